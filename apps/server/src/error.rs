//! # API Error Type
//!
//! Unified error type for the JSON API.
//!
//! ## Serialization
//! This is what the frontend receives when a request fails:
//! ```json
//! {
//!   "code": "PERMISSION_DENIED",
//!   "message": "需要管理员权限"
//! }
//! ```
//! The `code` is for programmatic handling, the `message` for display.
//! The HTTP status follows the code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use perla_core::error::CoreError;
use perla_studio::StudioError;

/// API error returned from JSON endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Login rejected (401)
    AuthFailed,

    /// Admin-only operation without an admin session (403)
    PermissionDenied,

    /// Operation conflicts with current state, e.g. opening an occupied
    /// table (409)
    Conflict,

    /// Document storage failed (500)
    StorageError,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::AuthFailed => StatusCode::UNAUTHORIZED,
            ErrorCode::PermissionDenied => StatusCode::FORBIDDEN,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::StorageError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Maps service failures onto API codes.
impl From<StudioError> for ApiError {
    fn from(err: StudioError) -> Self {
        let message = err.to_string();
        let code = match &err {
            StudioError::Core(CoreError::TableNotFound(_))
            | StudioError::Core(CoreError::ColorNotFound(_))
            | StudioError::UserNotFound => ErrorCode::NotFound,
            StudioError::Core(CoreError::InvalidTableState { .. })
            | StudioError::Core(CoreError::DuplicateColor(_))
            | StudioError::AdminUndeletable => ErrorCode::Conflict,
            StudioError::Core(CoreError::Validation(_)) | StudioError::Validation(_) => {
                ErrorCode::ValidationError
            }
            StudioError::InvalidCredentials => ErrorCode::AuthFailed,
            StudioError::PermissionDenied => ErrorCode::PermissionDenied,
            StudioError::Store(_) => ErrorCode::StorageError,
        };
        ApiError::new(code, message)
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
