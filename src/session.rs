//! Session-scoped storage and the scroll-offset handoff.
//!
//! The only state that survives a page navigation is one numeric scroll
//! offset. [`ScrollHandoff`] treats its slot as a one-shot channel between
//! successive page loads: the click handler writes it, the next attachment
//! takes it (read, then delete).

use compact_str::CompactString;
use parking_lot::Mutex;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Session file errors (command-line host only).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error when accessing session file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("session file `{0}` is not valid JSON")]
    Json(PathBuf, #[source] serde_json::Error),
}

/// Browser-tab-lifetime key/value storage.
///
/// Operations never fail: a storage that cannot be written behaves as if
/// nothing was stored.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

// ============================================================================
// In-memory store
// ============================================================================

/// Store living as long as the value itself.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.lock().clone()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.lock().insert(key.to_owned(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// Store persisted as a JSON object, standing in for a browser tab's
/// session storage across separate command invocations.
///
/// Changes are kept in memory until [`FileStore::save`].
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Open the session file; a missing file is an empty session.
    pub fn open(path: &Path) -> Result<Self, SessionError> {
        let entries = match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|err| SessionError::Json(path.to_path_buf(), err))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(SessionError::Io(path.to_path_buf(), err)),
        };

        Ok(Self {
            path: path.to_path_buf(),
            inner: MemoryStore::from_entries(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the session back; an empty session removes the file.
    pub fn save(&self) -> Result<(), SessionError> {
        let entries = self.inner.snapshot();
        let io_err = |err: std::io::Error| SessionError::Io(self.path.clone(), err);

        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(io_err(err)),
                _ => Ok(()),
            };
        }

        let json = serde_json::to_string_pretty(&entries)
            .map_err(|err| SessionError::Json(self.path.clone(), err))?;
        fs::write(&self.path, json).map_err(io_err)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: String) {
        self.inner.set(key, value);
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}

// ============================================================================
// Scroll handoff
// ============================================================================

/// One-shot scroll-offset channel over a single storage slot.
pub struct ScrollHandoff<'s> {
    store: &'s dyn SessionStore,
    key: CompactString,
}

impl<'s> ScrollHandoff<'s> {
    pub fn new(store: &'s dyn SessionStore, key: impl Into<CompactString>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Save the offset for the next page load.
    pub fn send(&self, offset: f64) {
        self.store.set(&self.key, offset.to_string());
    }

    /// Read the saved offset and clear the slot.
    ///
    /// A value that is not a finite number counts as absent (the slot is
    /// still cleared).
    pub fn take(&self) -> Option<f64> {
        let raw = self.store.get(&self.key);
        self.store.remove(&self.key);
        raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}
