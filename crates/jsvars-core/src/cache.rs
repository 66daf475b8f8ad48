//! Cache seam for the rendered accessor runtime.
//!
//! The runtime source only depends on configuration, so it can be rendered once and
//! shared across requests. Writers race with last-write-wins; every writer stores the
//! same content for a given key.

use std::collections::HashMap;
use std::sync::RwLock;

/// A string cache partitioned into named buckets.
pub trait TemplateCache: Send + Sync {
    /// Read `key` from bucket `config`.
    fn read(&self, config: &str, key: &str) -> Option<String>;

    /// Store `value` under `key` in bucket `config`, replacing any previous value.
    fn write(&self, config: &str, key: &str, value: &str);
}

/// A cache that never holds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl TemplateCache for NoCache {
    fn read(&self, _config: &str, _key: &str) -> Option<String> {
        None
    }

    fn write(&self, _config: &str, _key: &str, _value: &str) {}
}

/// In-process cache, shareable across requests behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<(String, String), String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries across all buckets.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry in bucket `config`.
    pub fn clear(&self, config: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|(bucket, _), _| bucket != config);
        }
    }
}

impl TemplateCache for MemoryCache {
    fn read(&self, config: &str, key: &str) -> Option<String> {
        let entries = self.entries.read().ok()?;
        entries.get(&(config.to_string(), key.to_string())).cloned()
    }

    fn write(&self, config: &str, key: &str, value: &str) {
        // A poisoned lock only means another writer panicked mid-insert; the
        // next render simply misses and re-renders.
        if let Ok(mut entries) = self.entries.write() {
            entries.insert((config.to_string(), key.to_string()), value.to_string());
        }
    }
}
