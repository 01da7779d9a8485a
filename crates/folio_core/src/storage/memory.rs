//! In-memory key-value store.
//!
//! Used by tests and throwaway sessions. Honors the same quota contract as
//! the SQLite backend so storage-full paths can be exercised without disk.

use super::{check_quota, entry_bytes, KvStore, StorageResult};
use std::collections::BTreeMap;

/// Volatile `KvStore` backed by a sorted map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    items: BTreeMap<String, String>,
    quota_bytes: Option<u64>,
}

impl MemoryKvStore {
    /// Creates an empty store without a byte budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects writes past `quota_bytes`.
    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            items: BTreeMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Replaces the byte budget. `None` removes it.
    pub fn set_quota(&mut self, quota_bytes: Option<u64>) {
        self.quota_bytes = quota_bytes;
    }

    /// Total bytes currently stored.
    pub fn usage_bytes(&self) -> u64 {
        self.items
            .iter()
            .map(|(key, value)| entry_bytes(key, value))
            .sum()
    }
}

impl KvStore for MemoryKvStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let others: u64 = self
            .items
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, stored)| entry_bytes(existing, stored))
            .sum();
        check_quota(others + entry_bytes(key, value), self.quota_bytes)?;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.items.remove(key);
        Ok(())
    }
}
