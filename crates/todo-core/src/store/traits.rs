//! Store Layer - Core Traits
//!
//! `TodoStore` is the capability set the list panel is written against.
//! `DocumentCollection` is the external collaborator behind the synced backend.

use async_trait::async_trait;

use super::subscription::Subscription;
use crate::domain::{DocumentPatch, DomainResult, Item, ItemId, NewDocument};
use crate::query::OrderedQuery;

/// Capabilities of a to-do list backend
///
/// Futures are `?Send`: stores live on the single UI thread.
#[async_trait(?Send)]
pub trait TodoStore {
    /// Add an item; `None` when the text is blank and nothing was done
    async fn add(&self, text: &str) -> DomainResult<Option<ItemId>>;

    /// Flip the completion flag of an item
    async fn toggle(&self, id: &ItemId) -> DomainResult<()>;

    /// Replace the text of an item
    async fn commit_edit(&self, id: &ItemId, text: &str) -> DomainResult<()>;

    /// Remove an item
    async fn delete(&self, id: &ItemId) -> DomainResult<()>;

    /// Latest known list
    fn current_list(&self) -> Vec<Item>;

    /// Open a stream of full-list snapshots
    async fn subscribe(&self) -> DomainResult<Subscription>;
}

/// Remote document collection with push notifications
#[async_trait(?Send)]
pub trait DocumentCollection {
    /// Create a document, returning its service-assigned key
    async fn create(&self, collection: &str, document: &NewDocument) -> DomainResult<String>;

    /// Update the given fields of one document
    async fn update_fields(&self, collection: &str, key: &str, patch: &DocumentPatch) -> DomainResult<()>;

    /// Delete one document
    async fn delete(&self, collection: &str, key: &str) -> DomainResult<()>;

    /// Standing query; every push is the full ordered result set
    async fn watch(&self, query: &OrderedQuery) -> DomainResult<Subscription>;
}
