//! In-process document collection used by tests

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use super::subscription::{SnapshotHub, Subscription};
use super::traits::DocumentCollection;
use crate::domain::{DocumentPatch, DomainError, DomainResult, Item, NewDocument, Snapshot, StoredDocument};
use crate::query::OrderedQuery;

/// Behaves like the document service: every successful mutation pushes the
/// full ordered snapshot. `watch` does not push until something changes or
/// `push_current` is called.
pub struct FakeCollection {
    docs: RefCell<Vec<StoredDocument>>,
    hub: SnapshotHub,
    clock: Cell<i64>,
    reject: Cell<bool>,
    requests: RefCell<Vec<String>>,
}

impl FakeCollection {
    pub fn new() -> Self {
        Self {
            docs: RefCell::new(Vec::new()),
            hub: SnapshotHub::new(),
            clock: Cell::new(1_000),
            reject: Cell::new(false),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn documents(&self) -> Vec<StoredDocument> {
        self.docs.borrow().clone()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn reject_requests(&self, reject: bool) {
        self.reject.set(reject);
    }

    /// Insert a document directly, without pushing
    pub fn seed(&self, id: &str, text: &str, created_at: i64) {
        self.docs.borrow_mut().push(StoredDocument {
            id: id.to_string(),
            text: text.to_string(),
            completed: false,
            created_at,
        });
    }

    pub fn push_current(&self) {
        self.hub.publish(&self.snapshot());
    }

    fn snapshot(&self) -> Snapshot {
        let mut items: Snapshot = self.docs.borrow().iter().cloned().map(Item::from).collect();
        OrderedQuery::newest_first("todos").sort(&mut items);
        items
    }

    fn record(&self, request: String) -> DomainResult<()> {
        self.requests.borrow_mut().push(request);
        if self.reject.get() {
            Err(DomainError::Remote("permission denied".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl DocumentCollection for FakeCollection {
    async fn create(&self, collection: &str, document: &NewDocument) -> DomainResult<String> {
        self.record(format!("create {collection}"))?;
        let created_at = self.clock.get();
        self.clock.set(created_at + 1);
        let key = format!("doc-{created_at}");
        self.docs.borrow_mut().push(StoredDocument {
            id: key.clone(),
            text: document.text.clone(),
            completed: document.completed,
            created_at,
        });
        self.push_current();
        Ok(key)
    }

    async fn update_fields(&self, collection: &str, key: &str, patch: &DocumentPatch) -> DomainResult<()> {
        self.record(format!("update {collection}/{key}"))?;
        {
            let mut docs = self.docs.borrow_mut();
            let doc = docs
                .iter_mut()
                .find(|d| d.id == key)
                .ok_or_else(|| DomainError::NotFound(key.to_string()))?;
            if let Some(text) = &patch.text {
                doc.text = text.clone();
            }
            if let Some(completed) = patch.completed {
                doc.completed = completed;
            }
        }
        self.push_current();
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> DomainResult<()> {
        self.record(format!("delete {collection}/{key}"))?;
        self.docs.borrow_mut().retain(|d| d.id != key);
        self.push_current();
        Ok(())
    }

    async fn watch(&self, _query: &OrderedQuery) -> DomainResult<Subscription> {
        Ok(self.hub.subscribe(None))
    }
}
