//! # Storage
//!
//! Key/value mirror for store state, modelled on browser local storage.
//!
//! Every store writes one document under its own key. Documents are JSON and
//! wrap the store state in a versioned envelope:
//!
//! ```text
//! {"state": {"products": [...]}, "version": 0}
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Envelope version written with every document.
pub const STATE_VERSION: u32 = 0;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A string key/value store.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().remove(key);
        Ok(())
    }
}

/// Directory-backed storage: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (and creates if needed) the storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { key: key.to_string(), source }),
        }
    }

    /// Writes a sibling temp file and renames it over the target, so a
    /// document is either the old one or the new one, never a partial write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_error = |source: io::Error| StorageError::Io { key: key.to_string(), source };
        let mut file = NamedTempFile::new_in(&self.dir).map_err(io_error)?;
        file.write_all(value.as_bytes()).map_err(io_error)?;
        file.as_file().sync_all().map_err(io_error)?;
        file.persist(self.path_for(key)).map_err(|e| io_error(e.error))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { key: key.to_string(), source }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Persisted<S> {
    state: S,
    version: u32,
}

/// Reads the state stored under `key`, if any.
pub fn load_state<S: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<S>, StorageError> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };
    let persisted: Persisted<S> = serde_json::from_str(&raw)?;
    Ok(Some(persisted.state))
}

/// Writes `state` under `key`, replacing whatever was there.
pub fn save_state<S: Serialize>(storage: &dyn Storage, key: &str, state: &S) -> Result<(), StorageError> {
    let raw = serde_json::to_string(&Persisted { state, version: STATE_VERSION })?;
    storage.set_item(key, &raw)
}

/// Reads the collection stored in field `field` of the state under `key`.
///
/// Returns `None` when the key is absent or its state lacks the field.
pub fn load_collection<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
    field: &str,
) -> Result<Option<Vec<T>>, StorageError> {
    let Some(mut state) = load_state::<Map<String, Value>>(storage, key)? else {
        return Ok(None);
    };
    match state.remove(field) {
        Some(items) => Ok(Some(serde_json::from_value(items)?)),
        None => Ok(None),
    }
}

/// Writes `items` as field `field` of the state under `key`.
pub fn save_collection<T: Serialize>(
    storage: &dyn Storage,
    key: &str,
    field: &str,
    items: &[&T],
) -> Result<(), StorageError> {
    let mut state = Map::new();
    state.insert(field.to_string(), serde_json::to_value(items)?);
    save_state(storage, key, &state)
}
