//! Domain Layer
//!
//! Contains the item entity, document wire shapes and core abstractions.

mod document;
mod entity;
mod item;

pub use document::{
    DocumentPatch, NewDocument, SnapshotEvent, StoredDocument, CREATED_AT_FIELD, SNAPSHOT_EVENT,
};
pub use entity::{DomainError, DomainResult, Entity};
pub use item::{normalize_text, IdMinter, Item, ItemId};

/// Full current list of items, replacing any previously held list
pub type Snapshot = Vec<Item>;
