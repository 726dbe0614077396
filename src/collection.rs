//! Tauri Document Collection
//!
//! `DocumentCollection` implementation backed by the desktop document service.

use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::mpsc;
use wasm_bindgen::prelude::*;

use todo_core::domain::{DocumentPatch, DomainError, DomainResult, Item, NewDocument, Snapshot, StoredDocument};
use todo_core::{DocumentCollection, OrderedQuery, RevisionGate, Subscription};

use crate::commands;

/// Talks to the document service through Tauri IPC
#[derive(Debug, Default, Clone, Copy)]
pub struct TauriCollection;

impl TauriCollection {
    pub fn new() -> Self {
        Self
    }
}

fn to_snapshot(query: &OrderedQuery, documents: Vec<StoredDocument>) -> Snapshot {
    let mut items: Snapshot = documents.into_iter().map(Item::from).collect();
    query.sort(&mut items);
    items
}

#[async_trait(?Send)]
impl DocumentCollection for TauriCollection {
    async fn create(&self, collection: &str, document: &NewDocument) -> DomainResult<String> {
        commands::create_document(collection, document)
            .await
            .map_err(DomainError::Remote)
    }

    async fn update_fields(&self, collection: &str, key: &str, patch: &DocumentPatch) -> DomainResult<()> {
        commands::update_document(collection, key, patch)
            .await
            .map_err(DomainError::Remote)
    }

    async fn delete(&self, collection: &str, key: &str) -> DomainResult<()> {
        commands::delete_document(collection, key)
            .await
            .map_err(DomainError::Remote)
    }

    async fn watch(&self, query: &OrderedQuery) -> DomainResult<Subscription> {
        let (tx, rx) = mpsc::unbounded::<Snapshot>();
        let gate = Rc::new(RevisionGate::new());

        let wanted = query.clone();
        let sink = tx.clone();
        let pushes = gate.clone();
        let handler = Closure::wrap(Box::new(move |event: JsValue| {
            match commands::decode_snapshot_event(event) {
                Ok(snapshot) if snapshot.collection == wanted.collection => {
                    if pushes.admit(snapshot.revision) {
                        let _ = sink.unbounded_send(to_snapshot(&wanted, snapshot.documents));
                    } else {
                        log::debug!("[SYNC] Dropping stale snapshot rev {}", snapshot.revision);
                    }
                }
                Ok(_) => {}
                Err(e) => log::warn!("[SYNC] Ignoring malformed snapshot: {}", e),
            }
        }) as Box<dyn FnMut(JsValue)>);

        // Listen before the initial read so no change between the two is lost;
        // whichever of the two is older gets dropped by the revision gate
        let listener = commands::listen_snapshots(handler)
            .await
            .map_err(DomainError::Remote)?;
        let initial = commands::list_documents(&query.collection)
            .await
            .map_err(DomainError::Remote)?;
        log::info!(
            "[SYNC] Watching '{}' ({} documents, rev {})",
            query.collection,
            initial.documents.len(),
            initial.revision
        );
        if gate.admit(initial.revision) {
            let _ = tx.unbounded_send(to_snapshot(query, initial.documents));
        }

        let collection = query.collection.clone();
        Ok(Subscription::new(rx).on_release(move || {
            log::debug!("[SYNC] Released watch on '{}'", collection);
            drop(listener);
        }))
    }
}
