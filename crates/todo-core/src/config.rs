//! Frontend Configuration
//!
//! Resolved from the page URL query, e.g. `?backend=local&errors=silent`.

use percent_encoding::percent_decode_str;

use crate::panel::FailurePolicy;

/// Default document collection for synced items
pub const DEFAULT_COLLECTION: &str = "todos";

/// Which store backs the list panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-memory list, gone when the page closes
    Local,
    /// Document collection behind the desktop shell
    Synced,
}

impl BackendKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "local" | "memory" => Some(BackendKind::Local),
            "synced" | "remote" => Some(BackendKind::Synced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend: BackendKind,
    pub collection: String,
    pub failure_policy: FailurePolicy,
}

impl AppConfig {
    /// Build from a query string (leading `?` optional).
    /// `service_available` picks the default backend when none is requested.
    pub fn from_query(query: &str, service_available: bool) -> Self {
        let mut config = AppConfig {
            backend: if service_available { BackendKind::Synced } else { BackendKind::Local },
            collection: DEFAULT_COLLECTION.to_string(),
            failure_policy: FailurePolicy::Surface,
        };

        for (key, value) in query_pairs(query) {
            match key.as_str() {
                "backend" => match BackendKind::parse(&value) {
                    Some(kind) => config.backend = kind,
                    None => log::warn!("[CONFIG] Unknown backend '{}', keeping {:?}", value, config.backend),
                },
                "collection" if !value.is_empty() => config.collection = value,
                "errors" => {
                    config.failure_policy = match value.as_str() {
                        "silent" | "log" => FailurePolicy::LogOnly,
                        _ => FailurePolicy::Surface,
                    }
                }
                _ => {}
            }
        }

        if config.backend == BackendKind::Synced && !service_available {
            log::warn!("[CONFIG] Synced backend requested but no document service, using local");
            config.backend = BackendKind::Local;
        }
        config
    }
}

/// Decode one query component; `+` stands for a space
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

fn query_pairs(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .map(|(key, value)| (decode_component(key), decode_component(value)))
}
