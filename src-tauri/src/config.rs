//! Service Configuration
//!
//! Filesystem locations resolved from the app handle.

use std::path::PathBuf;

use tauri::Manager;

pub const DB_FILE_NAME: &str = "todo_app.db";
pub const LOG_PREFIX: &str = "TodoApp";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
}

impl ServiceConfig {
    /// Resolve data and log directories, creating the data directory
    pub fn resolve(app_handle: &tauri::AppHandle) -> Result<Self, String> {
        let app_dir = app_handle
            .path()
            .app_data_dir()
            .map_err(|e| format!("Failed to get app data dir: {}", e))?;
        std::fs::create_dir_all(&app_dir)
            .map_err(|e| format!("Failed to create {}: {}", app_dir.display(), e))?;

        let log_dir = app_handle
            .path()
            .app_log_dir()
            .map_err(|e| format!("Failed to get log dir: {}", e))?;

        Ok(Self {
            db_path: app_dir.join(DB_FILE_NAME),
            log_dir,
        })
    }
}
