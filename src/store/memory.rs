//! In-process record store.
//!
//! Behaves like [`SeaOrmStore`](crate::store::SeaOrmStore) without a
//! database. Writes can be made to fail with [`MemoryStore::set_unavailable`]
//! to exercise persistence errors.

use crate::{
    core::records::{Collection, Document, OwnerId, Stored},
    entities::DocumentModel,
    errors::{Error, Result},
    store::{ListenerRegistry, RecordStore, Subscription},
};
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, AtomicI64, Ordering},
};
use tracing::{debug, info};

pub struct MemoryStore {
    app_id: String,
    documents: Mutex<Vec<DocumentModel>>,
    next_id: AtomicI64,
    listeners: Arc<ListenerRegistry>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            documents: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            listeners: Arc::new(ListenerRegistry::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Makes subsequent writes fail with `Error::StoreUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn collection_of(
        &self,
        documents: &[DocumentModel],
        collection: Collection,
        owner: &OwnerId,
    ) -> Vec<DocumentModel> {
        documents
            .iter()
            .filter(|d| {
                d.app_id == self.app_id
                    && d.collection == collection.as_str()
                    && d.owner_id == owner.as_str()
            })
            .cloned()
            .collect()
    }
}

impl RecordStore for MemoryStore {
    async fn subscribe<R, F>(&self, owner: &OwnerId, on_change: F) -> Result<Subscription>
    where
        R: Document,
        F: Fn(Vec<Stored<R>>) + Send + Sync + 'static,
    {
        let documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.collection_of(&documents, R::COLLECTION, owner);

        let subscription = self.listeners.register::<R, F>(owner, on_change);
        self.listeners.deliver_to(subscription.id(), &current);
        debug!(collection = %R::COLLECTION, %owner, count = current.len(), "Subscribed");
        Ok(subscription)
    }

    async fn create<R: Document>(&self, owner: &OwnerId, record: &R) -> Result<Stored<R>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::StoreUnavailable {
                message: "memory store is offline".to_string(),
            });
        }

        let payload = serde_json::to_string(record)?;
        let now = chrono::Utc::now().naive_utc();
        let document = DocumentModel {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            app_id: self.app_id.clone(),
            collection: R::COLLECTION.as_str().to_string(),
            owner_id: owner.as_str().to_string(),
            payload,
            created_at: now,
            updated_at: now,
        };

        // The lock stays held through the notification so deliveries keep write order.
        let mut documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        documents.push(document.clone());
        let current = self.collection_of(&documents, R::COLLECTION, owner);
        info!(id = document.id, collection = %R::COLLECTION, %owner, "Record created");
        self.listeners.notify(R::COLLECTION, owner, &current);

        Ok(Stored {
            id: document.id,
            created_at: document.created_at,
            updated_at: document.updated_at,
            record: record.clone(),
        })
    }
}
