//! File-backed session storage.
//!
//! One JSON object per file, `{ "<key>": "<raw string>" }`, standing in for
//! a browser tab's session store so the cart survives between CLI calls.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cart_store::{SessionStorage, StorageError};

pub struct SessionFile {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl SessionFile {
    /// Open `path`; a missing or empty file is an empty session.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let items = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).with_context(|| {
                format!("session file is not a JSON object of strings: {}", path.display())
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read session file: {}", path.display()))
            }
        };
        Ok(Self { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, key: &str) -> Result<(), StorageError> {
        let backend = |reason: String| StorageError::Backend {
            key: key.to_string(),
            reason,
        };
        let raw = serde_json::to_string_pretty(&self.items).map_err(|e| backend(e.to_string()))?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| backend(e.to_string()))?;
        }
        fs::write(&self.path, raw).map_err(|e| backend(format!("{}: {e}", self.path.display())))
    }
}

impl SessionStorage for SessionFile {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let previous = self.items.insert(key.to_string(), value);
        let res = self.flush(key);
        if res.is_err() {
            // keep memory in step with disk
            match previous {
                Some(v) => self.items.insert(key.to_string(), v),
                None => self.items.remove(key),
            };
        }
        res
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let Some(previous) = self.items.remove(key) else {
            return Ok(());
        };
        let res = self.flush(key);
        if res.is_err() {
            self.items.insert(key.to_string(), previous);
        }
        res
    }
}
