//! # Validation Module
//!
//! Input validation for user-supplied fields. Runs before any business
//! logic or document mutation, so a rejected input leaves nothing half
//! applied.
//!
//! ## Usage
//! ```rust,no_run
//! use perla_core::validation::{validate_username, validate_color_code};
//!
//! validate_username("admin").unwrap();
//! validate_color_code("A01").unwrap();
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Account Fields
// =============================================================================

/// Validates a login name.
///
/// ## Rules
/// - Must not be empty
/// - At most 30 characters
/// - Alphanumeric, hyphens and underscores only
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.chars().count() > 30 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 30,
        });
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a password. Only presence and length are checked; the account
/// model is plaintext-on-trusted-device.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() > 64 {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: 64,
        });
    }

    Ok(())
}

// =============================================================================
// Inventory Fields
// =============================================================================

/// Validates a bead color code ("A01", "H2-07").
pub fn validate_color_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().count() > 20 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 20,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a gram amount for a stock movement.
pub fn validate_gram_amount(gram: i64) -> ValidationResult<()> {
    if gram <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "gram".to_string(),
        });
    }

    // A single movement above 100 kg is a typo, not a delivery
    if gram > 100_000 {
        return Err(ValidationError::OutOfRange {
            field: "gram".to_string(),
            min: 1,
            max: 100_000,
        });
    }

    Ok(())
}

// =============================================================================
// Display Names
// =============================================================================

/// Validates a display name (user name, expense name, color name).
pub fn validate_display_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 50,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
