//! Domain Layer
//!
//! Document shapes are shared with the frontend through `todo-core`; the
//! service adds key minting.

mod document_key;

pub use document_key::{KeyMinter, KEY_LEN};
pub use todo_core::domain::{
    normalize_text, DocumentPatch, DomainError, DomainResult, NewDocument, SnapshotEvent,
    StoredDocument, SNAPSHOT_EVENT,
};
