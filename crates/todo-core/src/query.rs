//! Ordered Collection Queries

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::{Item, CREATED_AT_FIELD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

/// Fields a collection can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderField {
    #[serde(rename = "createdAt")]
    CreatedAt,
}

impl OrderField {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderField::CreatedAt => CREATED_AT_FIELD,
        }
    }
}

/// "All documents of a collection, ordered by one field"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedQuery {
    pub collection: String,
    pub field: OrderField,
    pub direction: Direction,
}

impl OrderedQuery {
    /// Newest first, the order the list panel displays synced items in
    pub fn newest_first(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            field: OrderField::CreatedAt,
            direction: Direction::Descending,
        }
    }

    /// Sort a snapshot into this query's order. Stable for equal keys.
    pub fn sort(&self, items: &mut [Item]) {
        items.sort_by(|a, b| self.compare(a, b));
    }

    fn compare(&self, a: &Item, b: &Item) -> Ordering {
        let ord = match self.field {
            OrderField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        match self.direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;

    fn item(id: &str, created_at: i64) -> Item {
        Item::new(ItemId::new(id), id).with_created_at(created_at)
    }

    #[test]
    fn test_newest_first_sort() {
        let query = OrderedQuery::newest_first("todos");
        let mut items = vec![item("old", 10), item("new", 30), item("mid", 20)];
        query.sort(&mut items);
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_query_wire_shape() {
        let json = serde_json::to_value(OrderedQuery::newest_first("todos")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "collection": "todos", "field": "createdAt", "direction": "descending" })
        );
    }
}
