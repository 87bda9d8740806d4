//! # Typed Documents
//!
//! [`Document<T>`] binds one storage key to one serde-typed value and is the
//! only way business code touches storage.
//!
//! ## Read Semantics: Absent Means Empty
//! `load()` cannot fail. An absent document, an unreadable medium or
//! malformed JSON all come back as `T::default()` - an empty collection or a
//! default config - with a warning in the log for the malformed case. This
//! mirrors how every reader in the original system treated its storage key.
//!
//! ## Write Semantics
//! `save()` and `update()` return errors; losing a write silently is not
//! acceptable even on a single trusted device.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::backend::StorageBackend;
use crate::error::{StoreError, StoreResult};

/// A single whole-document collection bound to a storage key.
pub struct Document<T> {
    backend: Arc<dyn StorageBackend>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Document<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    /// Binds a key on a backend.
    pub fn new(backend: Arc<dyn StorageBackend>, key: &'static str) -> Self {
        Document {
            backend,
            key,
            _marker: PhantomData,
        }
    }

    /// The storage key this document lives under.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Loads the document; absent, unreadable or malformed content yields
    /// `T::default()`.
    pub fn load(&self) -> T {
        let raw = match self.backend.get(self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                warn!(key = self.key, error = %e, "Storage read failed, using empty document");
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = self.key, error = %e, "Malformed document, using empty document");
                T::default()
            }
        }
    }

    /// Serializes and writes the whole document.
    pub fn save(&self, value: &T) -> StoreResult<()> {
        let raw =
            serde_json::to_string(value).map_err(|e| StoreError::serialize(self.key, e))?;
        self.backend.put(self.key, &raw)
    }

    /// Whole-document read-modify-write.
    ///
    /// This is the mutation primitive for every collection: load, let the
    /// closure edit in place, save, and hand the closure's result back.
    /// Single-writer by design; nothing else mutates between load and save.
    pub fn update<R>(&self, mutate: impl FnOnce(&mut T) -> R) -> StoreResult<R> {
        let mut value = self.load();
        let result = mutate(&mut value);
        self.save(&value)?;
        Ok(result)
    }

    /// Deletes the document entirely (next `load()` sees the default).
    pub fn clear(&self) -> StoreResult<()> {
        self.backend.remove(self.key)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn doc(backend: &Arc<MemoryBackend>) -> Document<Vec<String>> {
        let shared: Arc<dyn StorageBackend> = backend.clone();
        Document::new(shared, "testDoc")
    }

    #[test]
    fn test_absent_loads_default() {
        let backend = Arc::new(MemoryBackend::new());
        assert!(doc(&backend).load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let backend = Arc::new(MemoryBackend::new());
        let d = doc(&backend);
        d.save(&vec!["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(d.load(), vec!["a", "b"]);
    }

    #[test]
    fn test_malformed_loads_default() {
        let backend = Arc::new(MemoryBackend::new());
        backend.put("testDoc", "{not json").unwrap();
        assert!(doc(&backend).load().is_empty());
    }

    #[test]
    fn test_wrong_shape_loads_default() {
        let backend = Arc::new(MemoryBackend::new());
        backend.put("testDoc", r#"{"a": 1}"#).unwrap();
        assert!(doc(&backend).load().is_empty());
    }

    #[test]
    fn test_update_is_read_modify_write() {
        let backend = Arc::new(MemoryBackend::new());
        let d = doc(&backend);
        d.save(&vec!["a".to_string()]).unwrap();

        let len = d
            .update(|items| {
                items.push("b".to_string());
                items.len()
            })
            .unwrap();

        assert_eq!(len, 2);
        assert_eq!(d.load(), vec!["a", "b"]);
    }

    #[test]
    fn test_clear_resets_to_default() {
        let backend = Arc::new(MemoryBackend::new());
        let d = doc(&backend);
        d.save(&vec!["a".to_string()]).unwrap();
        d.clear().unwrap();
        assert!(d.load().is_empty());
    }
}
