//! Tauri Commands for Diagnostics
//!
//! Where the shell keeps its files and what it logged last.

use std::path::PathBuf;

use serde::Serialize;
use tauri::State;

use crate::config::ServiceConfig;
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStatus {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    /// Most recent log lines, oldest first
    pub recent: Vec<String>,
}

impl LogStatus {
    pub fn collect(config: &ServiceConfig) -> Self {
        Self {
            db_path: config.db_path.clone(),
            log_dir: config.log_dir.clone(),
            log_file: rolling_logger::active_log_path(),
            recent: rolling_logger::recent_lines(),
        }
    }
}

/// Storage locations and the tail of the in-memory log buffer
#[tauri::command]
pub fn log_status(state: State<'_, AppState>) -> LogStatus {
    LogStatus::collect(&state.config)
}
