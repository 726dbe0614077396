//! Store Layer
//!
//! The capability interface the list panel is written against, and its two
//! backends.

mod memory;
mod remote;
mod subscription;
mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use memory::MemoryStore;
pub use remote::RemoteStore;
pub use subscription::{RevisionGate, SnapshotHub, Subscription};
pub use traits::{DocumentCollection, TodoStore};
