//! Tauri Commands for the Document Collection
//!
//! Exposes collection CRUD to the frontend via Tauri IPC. Every successful
//! mutation is followed by a full snapshot on `SNAPSHOT_EVENT`, stamped with
//! the revision of the write that produced it.

use tauri::{AppHandle, Emitter, State};

use crate::domain::{DocumentPatch, NewDocument, SnapshotEvent, SNAPSHOT_EVENT};
use crate::AppState;

fn publish(app: &AppHandle, snapshot: &SnapshotEvent) {
    if let Err(e) = app.emit(SNAPSHOT_EVENT, snapshot) {
        log::error!("Failed to emit snapshot for {}: {}", snapshot.collection, e);
    }
}

/// Create a document; returns the assigned key
#[tauri::command]
pub async fn create_document(
    app: AppHandle,
    state: State<'_, AppState>,
    collection: String,
    document: NewDocument,
) -> Result<String, String> {
    let mutation = state
        .service
        .create(&collection, &document)
        .await
        .map_err(|e| {
            log::warn!("create_document in {} failed: {}", collection, e);
            e.to_string()
        })?;

    publish(&app, &mutation.snapshot);
    Ok(mutation.value)
}

/// Update the present fields of a document
#[tauri::command]
pub async fn update_document(
    app: AppHandle,
    state: State<'_, AppState>,
    collection: String,
    id: String,
    patch: DocumentPatch,
) -> Result<(), String> {
    let mutation = state
        .service
        .update(&collection, &id, &patch)
        .await
        .map_err(|e| {
            log::warn!("update_document {} in {} failed: {}", id, collection, e);
            e.to_string()
        })?;

    publish(&app, &mutation.snapshot);
    Ok(())
}

/// Delete a document; unknown keys are not an error
#[tauri::command]
pub async fn delete_document(
    app: AppHandle,
    state: State<'_, AppState>,
    collection: String,
    id: String,
) -> Result<(), String> {
    let mutation = state
        .service
        .delete(&collection, &id)
        .await
        .map_err(|e| {
            log::warn!("delete_document {} in {} failed: {}", id, collection, e);
            e.to_string()
        })?;

    publish(&app, &mutation.snapshot);
    Ok(())
}

/// Current snapshot of a collection, newest first, with its revision
#[tauri::command]
pub async fn list_documents(
    state: State<'_, AppState>,
    collection: String,
) -> Result<SnapshotEvent, String> {
    state.service.snapshot(&collection).await.map_err(|e| e.to_string())
}
