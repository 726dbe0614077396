//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for document storage.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;

use crate::domain::{DocumentPatch, DomainResult, NewDocument, SnapshotEvent, StoredDocument};

/// Result of a write plus the collection snapshot taken right after it,
/// before any other write could run
#[derive(Debug, Clone)]
pub struct Mutation<T> {
    pub value: T,
    pub snapshot: SnapshotEvent,
}

/// Collection-scoped document storage
///
/// All operations are async to support various backends.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Store a new document, assigning its key and creation time
    async fn insert(&self, collection: &str, document: &NewDocument) -> DomainResult<Mutation<StoredDocument>>;

    /// Find a document by key
    async fn find_by_key(&self, collection: &str, key: &str) -> DomainResult<Option<StoredDocument>>;

    /// All documents of a collection, newest first, at the current revision
    async fn snapshot(&self, collection: &str) -> DomainResult<SnapshotEvent>;

    /// Apply the present fields of `patch`; `NotFound` for an unknown key
    async fn patch(&self, collection: &str, key: &str, patch: &DocumentPatch) -> DomainResult<Mutation<StoredDocument>>;

    /// Delete by key; the value tells whether a document was removed
    async fn remove(&self, collection: &str, key: &str) -> DomainResult<Mutation<bool>>;
}
