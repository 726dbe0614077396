//! Todo Core
//!
//! Platform-independent parts of the todo app:
//! - domain: Item entity, document wire shapes, errors
//! - store: `TodoStore` capability trait with in-memory and remote backends
//! - panel: view-model driven by the list panel component
//! - config: frontend configuration from the page query

pub mod config;
pub mod domain;
pub mod panel;
pub mod query;
pub mod store;

pub use config::{AppConfig, BackendKind};
pub use domain::{DomainError, DomainResult, Item, ItemId, Snapshot};
pub use panel::{EditSession, FailurePolicy, PanelAction, PanelState};
pub use query::OrderedQuery;
pub use store::{DocumentCollection, MemoryStore, RemoteStore, RevisionGate, Subscription, TodoStore};
