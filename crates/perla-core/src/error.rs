//! # Error Types
//!
//! Domain-specific error types for perla-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  perla-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  perla-store errors (separate crate)                                   │
//! │  └── StoreError       - Document storage failures                      │
//! │                                                                         │
//! │  perla-studio errors (separate crate)                                  │
//! │  └── StudioError      - Service-level failures                         │
//! │                                                                         │
//! │  Server API errors (in app)                                            │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StudioError → ApiError → UI       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (table id, color code, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They should be caught
/// and translated to user-friendly messages at the API boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Table cannot be found in the registry.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Table is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Opening a table that is already in use
    /// - Pausing a table that is free or already paused
    /// - Closing a table that was never opened
    #[error("Table {table_id} is {current_state}, cannot perform operation")]
    InvalidTableState {
        table_id: String,
        current_state: String,
    },

    /// Bead color cannot be found by its code.
    #[error("Bead color not found: {0}")]
    ColorNotFound(String),

    /// A bead color with the same code already exists.
    #[error("Bead color '{0}' already exists")]
    DuplicateColor(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad characters in a color code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate username).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
