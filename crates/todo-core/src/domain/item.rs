//! Item Entity
//!
//! A single to-do entry in a flat list.

use std::cell::Cell;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Opaque item identifier
///
/// Either minted locally from a millisecond timestamp or assigned by the
/// document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Display text
    pub text: String,
    /// Completion status
    #[serde(default)]
    pub completed: bool,
    /// Creation time in epoch milliseconds (synced items only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Item {
    /// Create a new, not yet completed item
    pub fn new(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            created_at: None,
        }
    }

    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Trim user input; `None` when nothing is left
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Mints timestamp-derived ids that stay strictly increasing.
#[derive(Debug, Default)]
pub struct IdMinter {
    last: Cell<i64>,
}

impl IdMinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint an id from the current wall clock
    pub fn mint(&self) -> ItemId {
        self.mint_at(chrono::Utc::now().timestamp_millis())
    }

    /// Mint an id for the given millisecond timestamp.
    /// Repeated or earlier timestamps are bumped past the last minted value.
    pub fn mint_at(&self, now_ms: i64) -> ItemId {
        let next = now_ms.max(self.last.get() + 1);
        self.last.set(next);
        ItemId(next.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_creation() {
        let item = Item::new(ItemId::new("1"), "Buy milk");
        assert_eq!(item.id().as_str(), "1");
        assert_eq!(item.text, "Buy milk");
        assert!(!item.completed);
        assert!(item.created_at.is_none());
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Walk dog \n"), Some("Walk dog".to_string()));
        assert_eq!(normalize_text(" \t "), None);
        assert_eq!(normalize_text(""), None);
    }

    #[test]
    fn test_minted_ids_unique_within_same_millisecond() {
        let minter = IdMinter::new();
        let a = minter.mint_at(1_700_000_000_000);
        let b = minter.mint_at(1_700_000_000_000);
        let c = minter.mint_at(1_699_999_999_999);
        assert_eq!(a.as_str(), "1700000000000");
        assert_eq!(b.as_str(), "1700000000001");
        assert_eq!(c.as_str(), "1700000000002");
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item::new(ItemId::new("k1"), "Read").with_created_at(42);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "k1");
        assert_eq!(json["createdAt"], 42);

        let local = serde_json::to_value(Item::new(ItemId::new("k2"), "x")).unwrap();
        assert!(local.get("createdAt").is_none());
    }
}
