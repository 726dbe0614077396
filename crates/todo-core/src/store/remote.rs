//! Remote Document Store Adapter
//!
//! Backend for the synced variant. Mutations are requests against a
//! `DocumentCollection`; the held list only changes when the collection
//! pushes a snapshot.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use super::subscription::Subscription;
use super::traits::{DocumentCollection, TodoStore};
use crate::domain::{
    normalize_text, DocumentPatch, DomainResult, Entity, Item, ItemId, NewDocument, Snapshot,
};
use crate::query::OrderedQuery;

/// `TodoStore` over an external document collection
pub struct RemoteStore<C> {
    collection: C,
    query: OrderedQuery,
    latest: Rc<RefCell<Snapshot>>,
}

impl<C: DocumentCollection> RemoteStore<C> {
    pub fn new(collection: C, query: OrderedQuery) -> Self {
        Self {
            collection,
            query,
            latest: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    fn name(&self) -> &str {
        &self.query.collection
    }

    fn completed_flag(&self, id: &ItemId) -> Option<bool> {
        self.latest
            .borrow()
            .iter()
            .find(|item| item.id() == id)
            .map(|item| item.completed)
    }
}

#[async_trait(?Send)]
impl<C: DocumentCollection> TodoStore for RemoteStore<C> {
    async fn add(&self, text: &str) -> DomainResult<Option<ItemId>> {
        let Some(text) = normalize_text(text) else {
            return Ok(None);
        };
        let document = NewDocument { text, completed: false };
        match self.collection.create(self.name(), &document).await {
            Ok(key) => Ok(Some(ItemId::new(key))),
            Err(e) => {
                log::error!("Error adding todo: {}", e);
                Err(e)
            }
        }
    }

    async fn toggle(&self, id: &ItemId) -> DomainResult<()> {
        let Some(completed) = self.completed_flag(id) else {
            log::debug!("[REMOTE] Toggle ignored, {} not in latest snapshot", id);
            return Ok(());
        };
        self.collection
            .update_fields(self.name(), id.as_str(), &DocumentPatch::completed(!completed))
            .await
            .inspect_err(|e| log::error!("Error toggling todo: {}", e))
    }

    async fn commit_edit(&self, id: &ItemId, text: &str) -> DomainResult<()> {
        self.collection
            .update_fields(self.name(), id.as_str(), &DocumentPatch::text(text))
            .await
            .inspect_err(|e| log::error!("Error updating todo: {}", e))
    }

    async fn delete(&self, id: &ItemId) -> DomainResult<()> {
        self.collection
            .delete(self.name(), id.as_str())
            .await
            .inspect_err(|e| log::error!("Error deleting todo: {}", e))
    }

    fn current_list(&self) -> Vec<Item> {
        self.latest.borrow().clone()
    }

    async fn subscribe(&self) -> DomainResult<Subscription> {
        let subscription = self.collection.watch(&self.query).await?;
        let latest = self.latest.clone();
        Ok(subscription.inspect(move |snapshot| {
            *latest.borrow_mut() = snapshot.clone();
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::FakeCollection;
    use futures::executor::block_on;
    use futures::StreamExt;

    fn store() -> RemoteStore<FakeCollection> {
        RemoteStore::new(FakeCollection::new(), OrderedQuery::newest_first("todos"))
    }

    #[test]
    fn test_add_submits_trimmed_incomplete_document() {
        let store = store();
        let id = block_on(store.add("  Buy milk ")).unwrap().unwrap();
        let docs = store.collection().documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id.as_str());
        assert_eq!(docs[0].text, "Buy milk");
        assert!(!docs[0].completed);
    }

    #[test]
    fn test_blank_add_sends_nothing() {
        let store = store();
        assert_eq!(block_on(store.add("   ")).unwrap(), None);
        assert!(store.collection().requests().is_empty());
    }

    #[test]
    fn test_no_optimistic_update() {
        let store = store();
        block_on(store.add("pending")).unwrap();
        // nothing subscribed yet, so nothing was received
        assert!(store.current_list().is_empty());
    }

    #[test]
    fn test_toggle_uses_latest_snapshot_flag() {
        let store = store();
        let mut sub = block_on(store.subscribe()).unwrap();
        let id = block_on(store.add("flip")).unwrap().unwrap();
        block_on(sub.next()).unwrap();

        block_on(store.toggle(&id)).unwrap();
        let pushed = block_on(sub.next()).unwrap();
        assert!(pushed[0].completed);
        assert!(store.current_list()[0].completed);

        block_on(store.toggle(&id)).unwrap();
        block_on(sub.next()).unwrap();
        assert!(!store.current_list()[0].completed);
    }

    #[test]
    fn test_toggle_unknown_id_issues_no_request() {
        let store = store();
        block_on(store.toggle(&ItemId::new("ghost"))).unwrap();
        assert!(store.collection().requests().is_empty());
    }

    #[test]
    fn test_edit_and_delete_target_single_document() {
        let store = store();
        let mut sub = block_on(store.subscribe()).unwrap();
        let keep = block_on(store.add("keep")).unwrap().unwrap();
        let edit = block_on(store.add("edit me")).unwrap().unwrap();
        block_on(store.commit_edit(&edit, "edited")).unwrap();
        block_on(store.delete(&keep)).unwrap();

        let mut last = Vec::new();
        for _ in 0..4 {
            last = block_on(sub.next()).unwrap();
        }
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].id, edit);
        assert_eq!(last[0].text, "edited");
    }

    #[test]
    fn test_rejected_add_leaves_list_unchanged() {
        let store = store();
        let mut sub = block_on(store.subscribe()).unwrap();
        store.collection().push_current();
        block_on(sub.next()).unwrap();
        let before = store.current_list();

        store.collection().reject_requests(true);
        let result = block_on(store.add("nope"));
        assert!(matches!(result, Err(crate::domain::DomainError::Remote(_))));
        assert_eq!(store.current_list(), before);
    }

    #[test]
    fn test_snapshot_replaces_list_wholesale() {
        let store = store();
        let mut sub = block_on(store.subscribe()).unwrap();
        block_on(store.add("older")).unwrap();
        block_on(store.add("newer")).unwrap();
        block_on(sub.next()).unwrap();
        let snapshot = block_on(sub.next()).unwrap();

        let texts: Vec<_> = snapshot.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["newer", "older"]);
        assert_eq!(store.current_list(), snapshot);
    }

    #[test]
    fn test_rejected_toggle_keeps_latest_flag_and_pushes_nothing() {
        use futures::FutureExt;

        let store = store();
        let mut sub = block_on(store.subscribe()).unwrap();
        let id = block_on(store.add("stay open")).unwrap().unwrap();
        block_on(sub.next()).unwrap();

        store.collection().reject_requests(true);
        let result = block_on(store.toggle(&id));
        assert!(matches!(result, Err(crate::domain::DomainError::Remote(_))));

        // the row must go back to the flag of the latest snapshot
        assert!(!store.current_list()[0].completed);
        assert!(!store.collection().documents()[0].completed);
        assert!(sub.next().now_or_never().is_none());
    }
}
