//! `SeaORM`-backed record store.
//!
//! Every record lives as one row of the `documents` table, scoped by
//! application id, collection and owner. Listeners are in-process: each
//! insert and the reload of its collection run in one transaction, and once
//! that commits the reloaded collection is pushed to every subscriber of the
//! `(collection, owner)` pair. A failed reload rolls the insert back.

use crate::{
    core::records::{Collection, Document, OwnerId, Stored, collection_path},
    entities::{Document as DocumentEntity, DocumentColumn, DocumentModel, document},
    errors::Result,
    store::{ListenerRegistry, RecordStore, Subscription},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub struct SeaOrmStore {
    db: DatabaseConnection,
    app_id: String,
    listeners: Arc<ListenerRegistry>,
    /// Serializes writes with their notifications and with initial deliveries.
    publish: Mutex<()>,
}

impl SeaOrmStore {
    #[must_use]
    pub fn new(db: DatabaseConnection, app_id: impl Into<String>) -> Self {
        Self {
            db,
            app_id: app_id.into(),
            listeners: Arc::new(ListenerRegistry::new()),
            publish: Mutex::new(()),
        }
    }

    /// Loads an owner's collection ordered by id.
    pub async fn load(&self, collection: Collection, owner: &OwnerId) -> Result<Vec<DocumentModel>> {
        self.load_with(&self.db, collection, owner).await
    }

    async fn load_with<C: ConnectionTrait>(
        &self,
        conn: &C,
        collection: Collection,
        owner: &OwnerId,
    ) -> Result<Vec<DocumentModel>> {
        DocumentEntity::find()
            .filter(DocumentColumn::AppId.eq(self.app_id.as_str()))
            .filter(DocumentColumn::Collection.eq(collection.as_str()))
            .filter(DocumentColumn::OwnerId.eq(owner.as_str()))
            .order_by_asc(DocumentColumn::Id)
            .all(conn)
            .await
            .map_err(Into::into)
    }
}

impl RecordStore for SeaOrmStore {
    async fn subscribe<R, F>(&self, owner: &OwnerId, on_change: F) -> Result<Subscription>
    where
        R: Document,
        F: Fn(Vec<Stored<R>>) + Send + Sync + 'static,
    {
        let _guard = self.publish.lock().await;
        let current = self.load(R::COLLECTION, owner).await?;

        let subscription = self.listeners.register::<R, F>(owner, on_change);
        self.listeners.deliver_to(subscription.id(), &current);
        debug!(
            path = %collection_path(&self.app_id, owner, R::COLLECTION),
            count = current.len(),
            "Subscribed"
        );
        Ok(subscription)
    }

    async fn create<R: Document>(&self, owner: &OwnerId, record: &R) -> Result<Stored<R>> {
        let payload = serde_json::to_string(record)?;
        let now = chrono::Utc::now().naive_utc();

        let _guard = self.publish.lock().await;
        let txn = self.db.begin().await?;
        let saved = document::ActiveModel {
            app_id: Set(self.app_id.clone()),
            collection: Set(R::COLLECTION.as_str().to_string()),
            owner_id: Set(owner.as_str().to_string()),
            payload: Set(payload),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .inspect_err(|e| warn!(collection = %R::COLLECTION, %owner, "Insert failed: {e}"))?;

        let current = self
            .load_with(&txn, R::COLLECTION, owner)
            .await
            .inspect_err(|e| warn!(collection = %R::COLLECTION, %owner, "Reload failed, insert rolled back: {e}"))?;
        txn.commit().await?;

        info!(
            id = saved.id,
            path = %collection_path(&self.app_id, owner, R::COLLECTION),
            "Record created"
        );
        self.listeners.notify(R::COLLECTION, owner, &current);

        Ok(Stored {
            id: saved.id,
            created_at: saved.created_at,
            updated_at: saved.updated_at,
            record: record.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::records::{ColorMixing, Order, OrderStatus, Painter};
    use crate::errors::Error;
    use crate::test_utils::{
        Recorder, init_test_tracing, mix, order, owner, painter, setup_test_db,
    };
    use sea_orm::{PaginatorTrait, Statement};
    use std::sync::Mutex as StdMutex;

    async fn count_painters(store: &SeaOrmStore) -> Result<u64> {
        Ok(DocumentEntity::find()
            .filter(DocumentColumn::Collection.eq("painters"))
            .count(&store.db)
            .await?)
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() -> Result<()> {
        init_test_tracing();
        let store = SeaOrmStore::new(setup_test_db().await?, "app");
        let saved = store.create(&owner("u1"), &painter("Alice", "555")).await?;

        assert!(saved.id > 0);
        assert_eq!(saved.created_at, saved.updated_at);
        assert_eq!(saved.record, painter("Alice", "555"));
        Ok(())
    }

    #[tokio::test]
    async fn test_subscriber_sees_initial_and_new_records() -> Result<()> {
        let store = SeaOrmStore::new(setup_test_db().await?, "app");
        store.create(&owner("u1"), &painter("Alice", "555")).await?;

        let recorder = Recorder::<Painter>::new();
        let _sub = store
            .subscribe::<Painter, _>(&owner("u1"), recorder.callback())
            .await?;
        assert_eq!(recorder.last_names(), ["Alice"]);

        store.create(&owner("u1"), &painter("Bob", "556")).await?;
        assert_eq!(recorder.deliveries(), 2);
        assert_eq!(recorder.last_names(), ["Alice", "Bob"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_records_round_trip_through_payload() -> Result<()> {
        let store = SeaOrmStore::new(setup_test_db().await?, "app");
        store
            .create(&owner("u1"), &order("Alice", OrderStatus::Completed, 99.5))
            .await?;
        store.create(&owner("u1"), &mix("Navy", "#000080")).await?;

        let orders = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&orders);
        let _a = store
            .subscribe::<Order, _>(&owner("u1"), move |rows| *sink.lock().unwrap() = rows)
            .await?;

        let mixes = Recorder::<ColorMixing>::new();
        let _b = store
            .subscribe::<ColorMixing, _>(&owner("u1"), mixes.callback())
            .await?;

        let orders = orders.lock().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].record, order("Alice", OrderStatus::Completed, 99.5));
        assert_eq!(mixes.last()[0].base_colors, ["Blue", "Black"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_scoped_by_app_and_owner() -> Result<()> {
        let db = setup_test_db().await?;
        let ours = SeaOrmStore::new(db.clone(), "app");
        let other_app = SeaOrmStore::new(db, "other-app");

        ours.create(&owner("u1"), &painter("Alice", "555")).await?;
        ours.create(&owner("u2"), &painter("Bob", "556")).await?;
        other_app.create(&owner("u1"), &painter("Carol", "557")).await?;

        let docs = ours.load(Collection::Painters, &owner("u1")).await?;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].collection, "painters");
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_reload_rolls_back_insert() -> Result<()> {
        init_test_tracing();
        let store = SeaOrmStore::new(setup_test_db().await?, "app");
        // A row whose timestamp cannot be decoded makes every reload fail
        store
            .db
            .execute(Statement::from_string(
                store.db.get_database_backend(),
                "INSERT INTO documents (app_id, collection, owner_id, payload, created_at, updated_at) \
                 VALUES ('app', 'painters', 'u1', '{}', 'garbage', 'garbage')",
            ))
            .await?;
        let recorder = Recorder::<Painter>::new();
        let _sub = store
            .listeners
            .register::<Painter, _>(&owner("u1"), recorder.callback());

        let result = store.create(&owner("u1"), &painter("Alice", "555")).await;

        assert!(matches!(result, Err(Error::Database(_))));
        assert_eq!(count_painters(&store).await?, 1);
        assert_eq!(recorder.deliveries(), 0);

        // Retrying after the failure does not leave a duplicate behind
        let _ = store.create(&owner("u1"), &painter("Alice", "555")).await;
        assert_eq!(count_painters(&store).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_deliveries() -> Result<()> {
        let store = SeaOrmStore::new(setup_test_db().await?, "app");
        let recorder = Recorder::<Painter>::new();
        let sub = store
            .subscribe::<Painter, _>(&owner("u1"), recorder.callback())
            .await?;

        sub.unsubscribe();
        store.create(&owner("u1"), &painter("Alice", "555")).await?;
        sub.unsubscribe();

        assert_eq!(recorder.deliveries(), 1);
        Ok(())
    }
}
