//! Record store - the seam between the dashboard and its document database.
//!
//! A store keeps each owner's records in per-collection lists. Subscribers
//! receive the full current list of a collection right away and again after
//! every write to it, always ordered by generated id.

pub mod listeners;
pub mod memory;
pub mod sea;

pub use listeners::{ListenerRegistry, Subscription};
pub use memory::MemoryStore;
pub use sea::SeaOrmStore;

use crate::{
    core::records::{Document, OwnerId, Stored},
    entities::DocumentModel,
    errors::Result,
};
use std::future::Future;

/// Subscribe and create operations over an owner's collections.
pub trait RecordStore: Send + Sync + 'static {
    /// Registers `on_change` for the owner's collection of `R`.
    ///
    /// The current contents are delivered once before this returns, then
    /// again after every change until the subscription is cancelled.
    fn subscribe<R, F>(
        &self,
        owner: &OwnerId,
        on_change: F,
    ) -> impl Future<Output = Result<Subscription>> + Send
    where
        R: Document,
        F: Fn(Vec<Stored<R>>) + Send + Sync + 'static;

    /// Persists `record` into the owner's collection of `R`.
    ///
    /// The store assigns the id and timestamps; subscribers of that
    /// collection are notified before this returns.
    fn create<R: Document>(
        &self,
        owner: &OwnerId,
        record: &R,
    ) -> impl Future<Output = Result<Stored<R>>> + Send;
}

/// Decodes a stored document into its typed record.
pub fn decode<R: Document>(document: &DocumentModel) -> Result<Stored<R>> {
    let record = serde_json::from_str(&document.payload)?;
    Ok(Stored {
        id: document.id,
        created_at: document.created_at,
        updated_at: document.updated_at,
        record,
    })
}
