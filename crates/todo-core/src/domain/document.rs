//! Document Shapes
//!
//! Wire types exchanged with the document collection service.

use serde::{Deserialize, Serialize};

use super::item::{Item, ItemId};

/// Name of the event carrying collection snapshots
pub const SNAPSHOT_EVENT: &str = "todos://snapshot";

/// Field used to order snapshots
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Payload for creating a document; the service assigns key and `createdAt`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    pub text: String,
    pub completed: bool,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl DocumentPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }
}

/// A document as pushed by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: i64,
}

impl From<StoredDocument> for Item {
    fn from(doc: StoredDocument) -> Self {
        Item {
            id: ItemId::new(doc.id),
            text: doc.text,
            completed: doc.completed,
            created_at: Some(doc.created_at),
        }
    }
}

/// Full snapshot of one collection
///
/// `revision` grows with every committed write; a snapshot with a lower
/// revision than one already seen is stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEvent {
    pub collection: String,
    #[serde(default)]
    pub revision: u64,
    pub documents: Vec<StoredDocument>,
}
