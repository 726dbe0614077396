//! Document Keys
//!
//! Service-assigned keys: 20 hex characters of a blake3 hash over the
//! collection, the creation time and a per-process counter.

use std::sync::atomic::{AtomicU64, Ordering};

pub const KEY_LEN: usize = 20;

#[derive(Debug, Default)]
pub struct KeyMinter {
    counter: AtomicU64,
}

impl KeyMinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&self, collection: &str, created_at: i64) -> String {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed);
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();

        let mut hasher = blake3::Hasher::new();
        hasher.update(collection.as_bytes());
        hasher.update(&created_at.to_le_bytes());
        hasher.update(&nanos.to_le_bytes());
        hasher.update(&sequence.to_le_bytes());
        hasher.update(&std::process::id().to_le_bytes());

        let hex = hasher.finalize().to_hex();
        hex.as_str()[..KEY_LEN].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_distinct_and_fixed_length() {
        let minter = KeyMinter::new();
        let a = minter.mint("todos", 1);
        let b = minter.mint("todos", 1);
        assert_eq!(a.len(), KEY_LEN);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
