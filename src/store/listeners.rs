//! Change listeners shared by the store implementations.

use crate::{
    core::records::{Collection, Document, OwnerId, Stored},
    entities::DocumentModel,
    store::decode,
};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, PoisonError, Weak,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};
use tracing::{debug, warn};

type Callback = Arc<dyn Fn(&[DocumentModel]) + Send + Sync>;

struct Listener {
    collection: Collection,
    owner: OwnerId,
    active: Arc<AtomicBool>,
    callback: Callback,
}

/// Registered subscribers, keyed by subscription id.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: AtomicU64,
    listeners: Mutex<HashMap<u64, Listener>>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a typed callback for `owner`'s collection of `R`.
    ///
    /// Documents that fail to decode are logged and left out of the delivery.
    pub fn register<R, F>(self: &Arc<Self>, owner: &OwnerId, on_change: F) -> Subscription
    where
        R: Document,
        F: Fn(Vec<Stored<R>>) + Send + Sync + 'static,
    {
        let callback: Callback = Arc::new(move |documents: &[DocumentModel]| {
            let records = documents
                .iter()
                .filter_map(|document| match decode::<R>(document) {
                    Ok(stored) => Some(stored),
                    Err(e) => {
                        warn!(
                            id = document.id,
                            collection = %R::COLLECTION,
                            "Skipping undecodable document: {e}"
                        );
                        None
                    }
                })
                .collect();
            on_change(records);
        });

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let active = Arc::new(AtomicBool::new(true));
        self.lock().insert(
            id,
            Listener {
                collection: R::COLLECTION,
                owner: owner.clone(),
                active: Arc::clone(&active),
                callback,
            },
        );
        debug!(id, collection = %R::COLLECTION, %owner, "Listener registered");

        Subscription {
            id,
            registry: Arc::downgrade(self),
            active,
        }
    }

    /// Delivers `documents` to every active listener of `(collection, owner)`.
    pub fn notify(&self, collection: Collection, owner: &OwnerId, documents: &[DocumentModel]) {
        let targets: Vec<(Arc<AtomicBool>, Callback)> = self
            .lock()
            .values()
            .filter(|l| l.collection == collection && &l.owner == owner)
            .map(|l| (Arc::clone(&l.active), Arc::clone(&l.callback)))
            .collect();

        // Callbacks run outside the registry lock so they may subscribe or cancel.
        for (active, callback) in targets {
            if active.load(Ordering::SeqCst) {
                callback(documents);
            }
        }
    }

    /// Delivers `documents` to a single listener.
    pub fn deliver_to(&self, id: u64, documents: &[DocumentModel]) {
        let target = self
            .lock()
            .get(&id)
            .map(|l| (Arc::clone(&l.active), Arc::clone(&l.callback)));

        if let Some((active, callback)) = target
            && active.load(Ordering::SeqCst)
        {
            callback(documents);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove(&self, id: u64) {
        if self.lock().remove(&id).is_some() {
            debug!(id, "Listener removed");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, Listener>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to a live subscription.
///
/// Cancelling is idempotent; dropping the handle cancels it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<ListenerRegistry>,
    active: Arc<AtomicBool>,
}

impl Subscription {
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stops further deliveries. Safe to call more than once.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::records::Painter;
    use crate::test_utils::{Recorder, owner, painter_document};

    #[test]
    fn test_notify_reaches_matching_listener_only() {
        let registry = Arc::new(ListenerRegistry::new());
        let mine = Recorder::<Painter>::new();
        let theirs = Recorder::<Painter>::new();
        let _a = registry.register::<Painter, _>(&owner("u1"), mine.callback());
        let _b = registry.register::<Painter, _>(&owner("u2"), theirs.callback());

        registry.notify(
            Collection::Painters,
            &owner("u1"),
            &[painter_document(1, "u1", "Alice")],
        );
        registry.notify(Collection::Stock, &owner("u1"), &[]);

        assert_eq!(mine.deliveries(), 1);
        assert_eq!(mine.last_names(), ["Alice"]);
        assert_eq!(theirs.deliveries(), 0);
    }

    #[test]
    fn test_undecodable_documents_are_skipped() {
        let registry = Arc::new(ListenerRegistry::new());
        let recorder = Recorder::<Painter>::new();
        let _sub = registry.register::<Painter, _>(&owner("u1"), recorder.callback());

        let mut broken = painter_document(2, "u1", "Bob");
        broken.payload = "not json".to_string();
        registry.notify(
            Collection::Painters,
            &owner("u1"),
            &[painter_document(1, "u1", "Alice"), broken],
        );

        assert_eq!(recorder.last_names(), ["Alice"]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let registry = Arc::new(ListenerRegistry::new());
        let recorder = Recorder::<Painter>::new();
        let sub = registry.register::<Painter, _>(&owner("u1"), recorder.callback());
        assert_eq!(registry.len(), 1);

        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        assert!(registry.is_empty());

        registry.notify(Collection::Painters, &owner("u1"), &[]);
        registry.deliver_to(sub.id(), &[]);
        assert_eq!(recorder.deliveries(), 0);
    }

    #[test]
    fn test_drop_cancels() {
        let registry = Arc::new(ListenerRegistry::new());
        let recorder = Recorder::<Painter>::new();
        drop(registry.register::<Painter, _>(&owner("u1"), recorder.callback()));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unsubscribe_after_registry_dropped() {
        let registry = Arc::new(ListenerRegistry::new());
        let recorder = Recorder::<Painter>::new();
        let sub = registry.register::<Painter, _>(&owner("u1"), recorder.callback());
        drop(registry);
        sub.unsubscribe();
        assert!(!sub.is_active());
    }
}
