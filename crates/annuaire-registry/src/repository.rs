//! Key/value document storage behind the registry.
//!
//! Each key holds one JSON document (a whole pool, the favorites list).
//! Backends compose: [`Mirrored`] writes to two stores and reads from the
//! first one that has the key.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::StoreError;

pub trait Repository {
    /// Returns `Ok(None)` when nothing has been stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replaces the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    fn put(&mut self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Deletes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<R: Repository + ?Sized> Repository for Box<R> {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Process-local storage, mostly for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    documents: HashMap<String, Value>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Repository for MemoryRepository {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.documents.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.documents.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.documents.remove(key);
        Ok(())
    }
}

/// One pretty-printed `<key>.json` file per key under a directory.
///
/// The directory is created on first write. Writes go to a temporary file
/// that is then renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonDirRepository {
    dir: PathBuf,
}

impl JsonDirRepository {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

impl Repository for JsonDirRepository {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path, e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Json {
                key: key.to_string(),
                source,
            })
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let body = serde_json::to_string_pretty(&value).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, body).map_err(|e| io_error(&tmp, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| io_error(&path, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}

/// Writes to both stores; reads from `primary`, falling back to `secondary`
/// when the primary has nothing under the key.
#[derive(Debug, Clone, Default)]
pub struct Mirrored<A, B> {
    pub primary: A,
    pub secondary: B,
}

impl<A, B> Mirrored<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }
}

impl<A: Repository, B: Repository> Repository for Mirrored<A, B> {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        match self.primary.get(key)? {
            Some(value) => Ok(Some(value)),
            None => self.secondary.get(key),
        }
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.primary.put(key, value.clone())?;
        self.secondary.put(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.primary.remove(key)?;
        self.secondary.remove(key)
    }
}
