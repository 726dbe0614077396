//! Document Service
//!
//! Wraps a repository and pairs every mutation with the collection snapshot
//! that must be pushed to listeners afterwards. Snapshots are taken inside
//! the repository's write section and carry its revision, so listeners can
//! drop ones that arrive late.

use crate::domain::{DocumentPatch, DomainError, DomainResult, NewDocument, SnapshotEvent};
use crate::repository::{DocumentRepository, Mutation};

pub struct DocumentService<R> {
    repo: R,
}

impl<R: DocumentRepository> DocumentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Current snapshot of a collection, newest first
    pub async fn snapshot(&self, collection: &str) -> DomainResult<SnapshotEvent> {
        self.repo.snapshot(collection).await
    }

    /// Create a document; returns its service-assigned key
    pub async fn create(&self, collection: &str, document: &NewDocument) -> DomainResult<Mutation<String>> {
        let Mutation { value, snapshot } = self.repo.insert(collection, document).await?;
        log::info!("created document {} in {} (rev {})", value.id, collection, snapshot.revision);
        Ok(Mutation {
            value: value.id,
            snapshot,
        })
    }

    /// Apply a partial update; an empty patch still yields a snapshot
    pub async fn update(&self, collection: &str, key: &str, patch: &DocumentPatch) -> DomainResult<Mutation<()>> {
        if patch.is_empty() {
            if self.repo.find_by_key(collection, key).await?.is_none() {
                return Err(DomainError::NotFound(format!("document {} in {}", key, collection)));
            }
            return Ok(Mutation {
                value: (),
                snapshot: self.repo.snapshot(collection).await?,
            });
        }

        let Mutation { snapshot, .. } = self.repo.patch(collection, key, patch).await?;
        Ok(Mutation { value: (), snapshot })
    }

    /// Delete a document; deleting an unknown key succeeds
    pub async fn delete(&self, collection: &str, key: &str) -> DomainResult<Mutation<bool>> {
        let mutation = self.repo.remove(collection, key).await?;
        if !mutation.value {
            log::debug!("delete of unknown document {} in {}", key, collection);
        }
        Ok(mutation)
    }
}
