//! In-Memory Store
//!
//! Backend for the local variant. The list lives only in this process and
//! every operation completes without suspending.

use std::cell::RefCell;

use async_trait::async_trait;

use super::subscription::{SnapshotHub, Subscription};
use super::traits::TodoStore;
use crate::domain::{normalize_text, DomainResult, Entity, IdMinter, Item, ItemId};

/// Authoritative ordered list held in memory
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<Vec<Item>>,
    minter: IdMinter,
    hub: SnapshotHub,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn publish(&self) {
        let snapshot = self.items.borrow().clone();
        self.hub.publish(&snapshot);
    }

    /// Apply `f` to the item with `id`; returns whether it was found
    fn modify(&self, id: &ItemId, f: impl FnOnce(&mut Item)) -> bool {
        let found = {
            let mut items = self.items.borrow_mut();
            items.iter_mut().find(|item| item.id() == id).map(f).is_some()
        };
        if found {
            self.publish();
        }
        found
    }
}

#[async_trait(?Send)]
impl TodoStore for MemoryStore {
    async fn add(&self, text: &str) -> DomainResult<Option<ItemId>> {
        let Some(text) = normalize_text(text) else {
            return Ok(None);
        };
        let id = self.minter.mint();
        self.items.borrow_mut().push(Item::new(id.clone(), text));
        log::debug!("[MEMORY] Added item {}", id);
        self.publish();
        Ok(Some(id))
    }

    async fn toggle(&self, id: &ItemId) -> DomainResult<()> {
        self.modify(id, |item| item.completed = !item.completed);
        Ok(())
    }

    async fn commit_edit(&self, id: &ItemId, text: &str) -> DomainResult<()> {
        self.modify(id, |item| item.text = text.to_string());
        Ok(())
    }

    async fn delete(&self, id: &ItemId) -> DomainResult<()> {
        let removed = {
            let mut items = self.items.borrow_mut();
            let before = items.len();
            items.retain(|item| item.id() != id);
            items.len() != before
        };
        if removed {
            log::debug!("[MEMORY] Deleted item {}", id);
            self.publish();
        }
        Ok(())
    }

    fn current_list(&self) -> Vec<Item> {
        self.items.borrow().clone()
    }

    async fn subscribe(&self) -> DomainResult<Subscription> {
        Ok(self.hub.subscribe(Some(self.current_list())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::StreamExt;

    fn add(store: &MemoryStore, text: &str) -> ItemId {
        block_on(store.add(text)).unwrap().expect("non-blank text is added")
    }

    #[test]
    fn test_adds_append_incomplete_items() {
        let store = MemoryStore::new();
        let texts = ["one", "two", " three ", "four"];
        for text in texts {
            add(&store, text);
            assert!(!store.current_list().last().unwrap().completed);
        }
        let list = store.current_list();
        assert_eq!(list.len(), texts.len());
        assert_eq!(list[2].text, "three");
    }

    #[test]
    fn test_whitespace_add_is_noop() {
        let store = MemoryStore::new();
        add(&store, "keep");
        let before = store.current_list();
        assert_eq!(block_on(store.add("   \t")).unwrap(), None);
        assert_eq!(store.current_list(), before);
    }

    #[test]
    fn test_ids_are_unique() {
        let store = MemoryStore::new();
        let ids: Vec<_> = (0..50).map(|i| add(&store, &format!("item {i}"))).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_toggle_is_involution() {
        let store = MemoryStore::new();
        let id = add(&store, "flip");
        block_on(store.toggle(&id)).unwrap();
        assert!(store.current_list()[0].completed);
        block_on(store.toggle(&id)).unwrap();
        assert!(!store.current_list()[0].completed);
    }

    #[test]
    fn test_toggle_absent_id_is_noop() {
        let store = MemoryStore::new();
        add(&store, "a");
        let before = store.current_list();
        block_on(store.toggle(&ItemId::new("missing"))).unwrap();
        assert_eq!(store.current_list(), before);
    }

    #[test]
    fn test_delete_removes_only_matching_item() {
        let store = MemoryStore::new();
        let a = add(&store, "a");
        let b = add(&store, "b");
        let c = add(&store, "c");
        block_on(store.delete(&b)).unwrap();
        let ids: Vec<_> = store.current_list().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![a, c]);

        block_on(store.delete(&ItemId::new("missing"))).unwrap();
        assert_eq!(store.current_list().len(), 2);
    }

    #[test]
    fn test_edit_commit_replaces_only_text() {
        let store = MemoryStore::new();
        let id = add(&store, "draft");
        block_on(store.toggle(&id)).unwrap();
        block_on(store.commit_edit(&id, "  final  ")).unwrap();

        let item = &store.current_list()[0];
        assert_eq!(item.id, id);
        assert!(item.completed);
        // edit commits are stored verbatim
        assert_eq!(item.text, "  final  ");
    }

    #[test]
    fn test_local_scenario() {
        let store = MemoryStore::new();
        let milk = add(&store, "Buy milk");
        let list = store.current_list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].text, "Buy milk");
        assert!(!list[0].completed);

        block_on(store.toggle(&milk)).unwrap();
        assert!(store.current_list()[0].completed);

        add(&store, "Walk dog");
        let list = store.current_list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].text, "Walk dog");

        block_on(store.delete(&milk)).unwrap();
        let list = store.current_list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].text, "Walk dog");
        assert!(!list[0].completed);
    }

    #[test]
    fn test_subscription_sees_current_list_then_changes() {
        let store = MemoryStore::new();
        add(&store, "first");
        let mut sub = block_on(store.subscribe()).unwrap();
        add(&store, "second");

        assert_eq!(block_on(sub.next()).unwrap().len(), 1);
        assert_eq!(block_on(sub.next()).unwrap().len(), 2);
    }
}
