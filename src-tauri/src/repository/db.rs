//! Database Connection and Setup
//!
//! Manages SQLite database connection and migrations.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

/// Shared connection handle
pub type DbConn = Arc<Mutex<Connection>>;

/// Open (or create) the database at `db_path` and run migrations.
/// `:memory:` opens a private in-memory database.
pub fn init_db(db_path: &Path) -> Result<DbConn, String> {
    let conn = if db_path.as_os_str() == ":memory:" {
        Connection::open_in_memory()
    } else {
        Connection::open(db_path)
    }
    .map_err(|e| format!("Failed to open db: {}", e))?;

    run_migrations(&conn)?;

    Ok(Arc::new(Mutex::new(conn)))
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            text TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER,
            PRIMARY KEY (collection, id)
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    // Snapshot queries read one collection newest first
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_documents_created ON documents(collection, created_at DESC)",
        [],
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}
