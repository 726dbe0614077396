//! Snapshot Subscriptions
//!
//! A subscription is a single-producer stream of full-list snapshots.
//! Dropping it releases the underlying listener.

use std::cell::{Cell, RefCell};
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll};

use futures::channel::mpsc::{self, UnboundedSender};
use futures::stream::{LocalBoxStream, Stream, StreamExt};

use crate::domain::Snapshot;

/// Handle to a standing snapshot subscription
///
/// Not restartable: once the stream ends, subscribe again for a fresh one.
pub struct Subscription {
    stream: LocalBoxStream<'static, Snapshot>,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Snapshot> + 'static,
    {
        Self {
            stream: stream.boxed_local(),
            release: None,
        }
    }

    /// Register a hook run exactly once when the subscription is dropped
    pub fn on_release(mut self, release: impl FnOnce() + 'static) -> Self {
        let previous = self.release.take();
        self.release = Some(Box::new(move || {
            release();
            if let Some(previous) = previous {
                previous();
            }
        }));
        self
    }

    /// Observe every snapshot before it is handed to the consumer
    pub fn inspect(self, observer: impl FnMut(&Snapshot) + 'static) -> Self {
        Subscription::new(StreamExt::inspect(self, observer))
    }
}

impl Stream for Subscription {
    type Item = Snapshot;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Snapshot>> {
        self.stream.poll_next_unpin(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Fan-out of snapshots to every live subscription
#[derive(Clone, Default)]
pub struct SnapshotHub {
    inner: Rc<RefCell<HubInner>>,
}

#[derive(Default)]
struct HubInner {
    next_key: u64,
    senders: Vec<(u64, UnboundedSender<Snapshot>)>,
}

impl SnapshotHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a subscription, optionally seeded with the current snapshot
    pub fn subscribe(&self, initial: Option<Snapshot>) -> Subscription {
        let (tx, rx) = mpsc::unbounded();
        if let Some(snapshot) = initial {
            let _ = tx.unbounded_send(snapshot);
        }

        let key = {
            let mut inner = self.inner.borrow_mut();
            let key = inner.next_key;
            inner.next_key += 1;
            inner.senders.push((key, tx));
            key
        };

        let hub: Weak<RefCell<HubInner>> = Rc::downgrade(&self.inner);
        Subscription::new(rx).on_release(move || {
            if let Some(inner) = hub.upgrade() {
                inner.borrow_mut().senders.retain(|(k, _)| *k != key);
            }
        })
    }

    /// Push a snapshot to all subscribers, pruning closed ones
    pub fn publish(&self, snapshot: &Snapshot) {
        self.inner
            .borrow_mut()
            .senders
            .retain(|(_, tx)| tx.unbounded_send(snapshot.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().senders.len()
    }
}

/// Drops snapshots that are not newer than the last one delivered
///
/// Pushes and the initial read of a watch can arrive in any order.
#[derive(Debug, Default)]
pub struct RevisionGate {
    last: Cell<Option<u64>>,
}

impl RevisionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a snapshot at `revision` should be delivered; records it if so
    pub fn admit(&self, revision: u64) -> bool {
        match self.last.get() {
            Some(last) if revision <= last => false,
            _ => {
                self.last.set(Some(revision));
                true
            }
        }
    }

    pub fn last(&self) -> Option<u64> {
        self.last.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Item, ItemId};
    use futures::executor::block_on;

    fn snapshot(texts: &[&str]) -> Snapshot {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Item::new(ItemId::new(i.to_string()), *t))
            .collect()
    }

    #[test]
    fn test_release_runs_once_on_drop() {
        let released = Rc::new(Cell::new(0));
        let counter = released.clone();
        let sub = Subscription::new(futures::stream::empty())
            .on_release(move || counter.set(counter.get() + 1));
        assert_eq!(released.get(), 0);
        drop(sub);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_inspect_keeps_release_hook() {
        let released = Rc::new(Cell::new(false));
        let seen = Rc::new(Cell::new(0));
        let (flag, count) = (released.clone(), seen.clone());

        let mut sub = Subscription::new(futures::stream::iter(vec![snapshot(&["a"])]))
            .on_release(move || flag.set(true))
            .inspect(move |_| count.set(count.get() + 1));

        assert_eq!(block_on(sub.next()).map(|s| s.len()), Some(1));
        assert_eq!(seen.get(), 1);
        assert!(!released.get());
        drop(sub);
        assert!(released.get());
    }

    #[test]
    fn test_hub_delivers_initial_then_published() {
        let hub = SnapshotHub::new();
        let mut sub = hub.subscribe(Some(snapshot(&["first"])));
        hub.publish(&snapshot(&["first", "second"]));

        let initial = block_on(sub.next()).unwrap();
        let next = block_on(sub.next()).unwrap();
        assert_eq!(initial.len(), 1);
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_hub_forgets_dropped_subscription() {
        let hub = SnapshotHub::new();
        let a = hub.subscribe(None);
        let _b = hub.subscribe(None);
        assert_eq!(hub.subscriber_count(), 2);
        drop(a);
        assert_eq!(hub.subscriber_count(), 1);
    }

    #[test]
    fn test_gate_drops_stale_initial_read_after_newer_push() {
        let gate = RevisionGate::new();
        // push from a write lands before the initial list read returns
        assert!(gate.admit(5));
        assert!(!gate.admit(4));
        assert!(!gate.admit(5));
        assert_eq!(gate.last(), Some(5));
        assert!(gate.admit(6));
    }

    #[test]
    fn test_gate_admits_first_snapshot_at_any_revision() {
        let gate = RevisionGate::new();
        assert_eq!(gate.last(), None);
        assert!(gate.admit(0));
        assert!(!gate.admit(0));
    }
}
