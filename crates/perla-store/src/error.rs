//! # Storage Error Types
//!
//! Error types for document storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the document key                      │
//! │       │                                                                 │
//! │       ├── reads: swallowed in Document::load (absent means empty)      │
//! │       │                                                                 │
//! │       └── writes: StudioError → ApiError → UI                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Document storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage medium failed (unreadable directory, disk full, ...).
    #[error("Storage I/O failed for '{key}': {message}")]
    Io { key: String, message: String },

    /// A value could not be serialized for writing.
    ///
    /// ## When This Occurs
    /// Practically never for these plain-data documents; surfaced rather
    /// than silently dropping a write.
    #[error("Failed to serialize document '{key}': {message}")]
    Serialize { key: String, message: String },
}

impl StoreError {
    /// Creates an I/O error for a document key.
    pub fn io(key: impl Into<String>, err: impl std::fmt::Display) -> Self {
        StoreError::Io {
            key: key.into(),
            message: err.to_string(),
        }
    }

    /// Creates a serialization error for a document key.
    pub fn serialize(key: impl Into<String>, err: impl std::fmt::Display) -> Self {
        StoreError::Serialize {
            key: key.into(),
            message: err.to_string(),
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::io("perlerTimerTables", "permission denied");
        assert_eq!(
            err.to_string(),
            "Storage I/O failed for 'perlerTimerTables': permission denied"
        );
    }
}
