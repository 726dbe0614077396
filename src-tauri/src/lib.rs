//! Todo App Backend
//!
//! Layered architecture:
//! - domain: Document shapes and key minting
//! - repository: Data access abstractions and implementations
//! - service: Mutations paired with collection snapshots
//! - commands: Tauri command handlers

use tauri::Manager;

mod commands;
mod config;
mod domain;
mod repository;
mod service;

pub use config::ServiceConfig;
use repository::{init_db, SqliteDocumentRepository};
use service::DocumentService;

/// Application state shared across commands
pub struct AppState {
    pub service: DocumentService<SqliteDocumentRepository>,
    pub config: ServiceConfig,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                let _ = rolling_logger::warn("Second instance started, focusing main window");
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let config = ServiceConfig::resolve(app.handle())?;

            // Initialize logging
            rolling_logger::init_logger(&config.log_dir, config::LOG_PREFIX)?;

            let conn = match init_db(&config.db_path) {
                Ok(conn) => {
                    let _ = rolling_logger::info(&format!("DB ready at {}", config.db_path.display()));
                    conn
                }
                Err(e) => {
                    let _ = rolling_logger::error(&format!(
                        "DB init failed at {}: {}",
                        config.db_path.display(),
                        e
                    ));
                    return Err(e.into());
                }
            };

            app.manage(AppState {
                service: DocumentService::new(SqliteDocumentRepository::new(conn)),
                config,
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::create_document,
            commands::update_document,
            commands::delete_document,
            commands::list_documents,
            commands::log_status,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
