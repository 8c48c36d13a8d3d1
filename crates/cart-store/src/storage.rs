//! Session-scoped string storage.
//!
//! The cart lives under a single key as a JSON string, the way a browser
//! tab's `sessionStorage` holds it. `SessionStorage` is the seam: the host
//! supplies the real store, tests and tools use [`MemoryStorage`].

use std::collections::BTreeMap;

/// Write failures a session store can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The value does not fit in the store's quota.
    QuotaExceeded {
        key: String,
        len: usize,
        quota: usize,
    },
    /// Backend-specific failure (I/O, binding error).
    Backend { key: String, reason: String },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExceeded { key, len, quota } => write!(
                f,
                "session storage quota exceeded writing '{key}': {len} bytes > {quota}"
            ),
            Self::Backend { key, reason } => {
                write!(f, "session storage write to '{key}' failed: {reason}")
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Key/value string store scoped to one browsing session.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: SessionStorage + ?Sized> SessionStorage for &mut T {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<T: SessionStorage + ?Sized> SessionStorage for Box<T> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-memory store, optionally with a total byte quota over all values.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: BTreeMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Seed a raw value, bypassing the quota (fixtures for malformed data).
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            let len = self.used_bytes_excluding(key) + key.len() + value.len();
            if len > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    len,
                    quota,
                });
            }
        }
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}
