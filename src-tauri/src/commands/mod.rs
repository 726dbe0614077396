//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod diagnostics_cmd;
mod document_cmd;

pub use diagnostics_cmd::*;
pub use document_cmd::*;
