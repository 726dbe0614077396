//! Document Repository Implementation
//!
//! SQLite-backed implementation of DocumentRepository. Every write and the
//! snapshot that follows it run under one connection lock, and each
//! committed write bumps the revision carried by snapshots.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::db::DbConn;
use super::traits::{DocumentRepository, Mutation};
use crate::domain::{
    normalize_text, DocumentPatch, DomainError, DomainResult, KeyMinter, NewDocument,
    SnapshotEvent, StoredDocument,
};

const SELECT_COLUMNS: &str = "SELECT id, text, completed, created_at FROM documents";

/// SQLite implementation of the document repository
pub struct SqliteDocumentRepository {
    conn: DbConn,
    keys: KeyMinter,
    // only changed while the connection lock is held
    revision: AtomicU64,
}

impl SqliteDocumentRepository {
    pub fn new(conn: DbConn) -> Self {
        Self {
            conn,
            keys: KeyMinter::default(),
            revision: AtomicU64::new(0),
        }
    }

    fn current_revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    fn next_revision(&self) -> u64 {
        self.revision.fetch_add(1, Ordering::SeqCst) + 1
    }
}

fn internal(e: rusqlite::Error) -> DomainError {
    DomainError::Internal(e.to_string())
}

fn row_to_document(row: &Row<'_>) -> rusqlite::Result<StoredDocument> {
    Ok(StoredDocument {
        id: row.get(0)?,
        text: row.get(1)?,
        completed: row.get::<_, i64>(2)? != 0,
        created_at: row.get(3)?,
    })
}

fn find(conn: &Connection, collection: &str, key: &str) -> DomainResult<Option<StoredDocument>> {
    conn.query_row(
        &format!("{} WHERE collection = ?1 AND id = ?2", SELECT_COLUMNS),
        params![collection, key],
        row_to_document,
    )
    .optional()
    .map_err(internal)
}

fn read_snapshot(conn: &Connection, collection: &str, revision: u64) -> DomainResult<SnapshotEvent> {
    let mut stmt = conn
        .prepare(&format!(
            "{} WHERE collection = ?1 ORDER BY created_at DESC, rowid DESC",
            SELECT_COLUMNS
        ))
        .map_err(internal)?;

    let documents = stmt
        .query_map(params![collection], row_to_document)
        .map_err(internal)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(internal)?;

    Ok(SnapshotEvent {
        collection: collection.to_string(),
        revision,
        documents,
    })
}

#[async_trait]
impl DocumentRepository for SqliteDocumentRepository {
    async fn insert(&self, collection: &str, document: &NewDocument) -> DomainResult<Mutation<StoredDocument>> {
        let text = normalize_text(&document.text)
            .ok_or_else(|| DomainError::InvalidInput("text must not be blank".to_string()))?;

        let now = Utc::now().timestamp_millis();
        let key = self.keys.mint(collection, now);

        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO documents (collection, id, text, completed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![collection, key, text, document.completed as i64, now],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(f, _)
                if f.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DomainError::Conflict(format!("document {} already exists", key))
            }
            other => internal(other),
        })?;

        let snapshot = read_snapshot(&conn, collection, self.next_revision())?;
        Ok(Mutation {
            value: StoredDocument {
                id: key,
                text,
                completed: document.completed,
                created_at: now,
            },
            snapshot,
        })
    }

    async fn find_by_key(&self, collection: &str, key: &str) -> DomainResult<Option<StoredDocument>> {
        let conn = self.conn.lock().await;
        find(&conn, collection, key)
    }

    async fn snapshot(&self, collection: &str) -> DomainResult<SnapshotEvent> {
        let conn = self.conn.lock().await;
        read_snapshot(&conn, collection, self.current_revision())
    }

    async fn patch(&self, collection: &str, key: &str, patch: &DocumentPatch) -> DomainResult<Mutation<StoredDocument>> {
        let conn = self.conn.lock().await;

        let changed = conn
            .execute(
                "UPDATE documents
                 SET text = COALESCE(?3, text),
                     completed = COALESCE(?4, completed),
                     updated_at = ?5
                 WHERE collection = ?1 AND id = ?2",
                params![
                    collection,
                    key,
                    patch.text,
                    patch.completed.map(|c| c as i64),
                    Utc::now().timestamp_millis()
                ],
            )
            .map_err(internal)?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("document {} in {}", key, collection)));
        }

        let value = find(&conn, collection, key)?
            .ok_or_else(|| DomainError::Internal(format!("document {} vanished after update", key)))?;
        let snapshot = read_snapshot(&conn, collection, self.next_revision())?;
        Ok(Mutation { value, snapshot })
    }

    async fn remove(&self, collection: &str, key: &str) -> DomainResult<Mutation<bool>> {
        let conn = self.conn.lock().await;
        let removed = conn
            .execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, key],
            )
            .map_err(internal)?
            > 0;

        let revision = if removed { self.next_revision() } else { self.current_revision() };
        let snapshot = read_snapshot(&conn, collection, revision)?;
        Ok(Mutation { value: removed, snapshot })
    }
}
