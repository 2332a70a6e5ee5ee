//! In-memory implementation of [`SecureStore`].
//!
//! NOT secure for production use: values live unencrypted in process memory.
//! Intended for tests and desktop development builds.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use super::{SecureStore, StoreError, StoreResult};

/// Thread-safe in-memory secure store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemorySecureStore {
    values: RwLock<HashMap<String, String>>,
    writes: AtomicU64,
    failing: AtomicBool,
}

impl MemorySecureStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: RwLock::new(values),
            ..Self::default()
        }
    }

    /// Returns the number of successful `set` calls since creation.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every subsequent read and write fail until reset with `false`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("store unavailable".to_string()));
        }
        Ok(())
    }
}

impl SecureStore for MemorySecureStore {
    fn get(&self, key: String) -> StoreResult<Option<String>> {
        self.check_available()?;
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::Backend("rwlock poisoned".to_string()))?;
        Ok(values.get(&key).cloned())
    }

    fn set(&self, key: String, value: String) -> StoreResult<()> {
        self.check_available()?;
        self.values
            .write()
            .map_err(|_| StoreError::Backend("rwlock poisoned".to_string()))?
            .insert(key, value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
