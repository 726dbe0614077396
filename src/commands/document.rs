//! Document Commands
//!
//! Frontend bindings for the document collection commands and the snapshot
//! push event.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use todo_core::domain::{DocumentPatch, NewDocument, SnapshotEvent, SNAPSHOT_EVENT};

use super::{invoke, js_error, listen};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct CollectionArgs<'a> {
    collection: &'a str,
}

#[derive(Serialize)]
struct CreateDocumentArgs<'a> {
    collection: &'a str,
    document: &'a NewDocument,
}

#[derive(Serialize)]
struct UpdateDocumentArgs<'a> {
    collection: &'a str,
    id: &'a str,
    patch: &'a DocumentPatch,
}

#[derive(Serialize)]
struct DocumentKeyArgs<'a> {
    collection: &'a str,
    id: &'a str,
}

// ========================
// Commands
// ========================

pub async fn create_document(collection: &str, document: &NewDocument) -> Result<String, String> {
    let js_args = serde_wasm_bindgen::to_value(&CreateDocumentArgs { collection, document }).map_err(|e| e.to_string())?;
    let result = invoke("create_document", js_args).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn update_document(collection: &str, id: &str, patch: &DocumentPatch) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(&UpdateDocumentArgs { collection, id, patch }).map_err(|e| e.to_string())?;
    invoke("update_document", js_args).await.map_err(js_error)?;
    Ok(())
}

pub async fn delete_document(collection: &str, id: &str) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(&DocumentKeyArgs { collection, id }).map_err(|e| e.to_string())?;
    invoke("delete_document", js_args).await.map_err(js_error)?;
    Ok(())
}

/// Current snapshot of a collection, newest first
pub async fn list_documents(collection: &str) -> Result<SnapshotEvent, String> {
    let js_args = serde_wasm_bindgen::to_value(&CollectionArgs { collection }).map_err(|e| e.to_string())?;
    let result = invoke("list_documents", js_args).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

// ========================
// Snapshot Events
// ========================

/// Registered snapshot listener; unlistens when dropped
pub struct SnapshotListener {
    unlisten: js_sys::Function,
    _handler: Closure<dyn FnMut(JsValue)>,
}

impl Drop for SnapshotListener {
    fn drop(&mut self) {
        if let Err(e) = self.unlisten.call0(&JsValue::NULL) {
            log::warn!("[SYNC] unlisten failed: {}", js_error(e));
        }
    }
}

/// Start receiving `todos://snapshot` events
pub async fn listen_snapshots(handler: Closure<dyn FnMut(JsValue)>) -> Result<SnapshotListener, String> {
    let unlisten = listen(SNAPSHOT_EVENT, &handler).await.map_err(js_error)?;
    let unlisten = unlisten
        .dyn_into::<js_sys::Function>()
        .map_err(|_| "listen did not return an unlisten function".to_string())?;
    Ok(SnapshotListener {
        unlisten,
        _handler: handler,
    })
}

/// Decode the `payload` of a Tauri event
pub fn decode_snapshot_event(event: JsValue) -> Result<SnapshotEvent, String> {
    let payload = js_sys::Reflect::get(&event, &JsValue::from_str("payload")).map_err(js_error)?;
    serde_wasm_bindgen::from_value(payload).map_err(|e| e.to_string())
}
