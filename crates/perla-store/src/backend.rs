//! # Storage Backends
//!
//! The [`StorageBackend`] trait abstracts the medium documents live in.
//! Production uses [`FileBackend`] (one JSON file per key); tests use
//! [`MemoryBackend`].
//!
//! All operations are synchronous: every document is small (the largest is
//! the order log, a few hundred KiB after a busy year) and there is exactly
//! one writer process, so blocking reads/writes are the simple and correct
//! model here.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Backend Trait
// =============================================================================

/// A string-keyed blob store for whole JSON documents.
pub trait StorageBackend: Send + Sync {
    /// Reads the raw document, `None` if it was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes the raw document, replacing any previous value atomically.
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes the document. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// File Backend
// =============================================================================

/// Stores each document as `<key>.json` inside a data directory.
///
/// ## Atomicity
/// Writes go to a sibling `.tmp` file first and are renamed into place, so
/// a crash mid-write leaves the previous document intact rather than a
/// truncated one.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Opens (and creates if missing) a data directory.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(dir.display().to_string(), e))?;
        Ok(FileBackend { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// The directory documents live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(|e| StoreError::io(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::io(key, e))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }
}

// =============================================================================
// Memory Backend
// =============================================================================

/// In-memory backend for tests and ephemeral tooling.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend.
    pub fn new() -> Self {
        MemoryBackend::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let documents = self
            .documents
            .lock()
            .map_err(|_| StoreError::io(key, "poisoned lock"))?;
        Ok(documents.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| StoreError::io(key, "poisoned lock"))?;
        documents.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| StoreError::io(key, "poisoned lock"))?;
        documents.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
