//! # Service Error Type
//!
//! One error enum for everything the services can fail with. Auth and
//! permission failures are ordinary `Err` values carrying the exact
//! user-facing message; nothing here panics and nothing applies half a
//! mutation before failing.

use thiserror::Error;

use perla_core::error::{CoreError, ValidationError};
use perla_store::StoreError;

/// Service-level errors.
#[derive(Debug, Error)]
pub enum StudioError {
    /// Business rule violation from perla-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input validation failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Document write failure from perla-store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Login rejected.
    ///
    /// One message for both unknown user and wrong password, so the login
    /// form cannot be used to enumerate usernames.
    #[error("用户名或密码错误")]
    InvalidCredentials,

    /// An admin-only mutation was attempted without an admin session.
    #[error("需要管理员权限")]
    PermissionDenied,

    /// The referenced account does not exist.
    #[error("用户不存在")]
    UserNotFound,

    /// The built-in admin account cannot be deleted.
    #[error("不能删除管理员账号")]
    AdminUndeletable,
}

/// Result type for service operations.
pub type StudioResult<T> = Result<T, StudioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(StudioError::InvalidCredentials.to_string(), "用户名或密码错误");
        assert_eq!(StudioError::PermissionDenied.to_string(), "需要管理员权限");
        assert_eq!(StudioError::AdminUndeletable.to_string(), "不能删除管理员账号");
    }

    #[test]
    fn test_core_error_passes_through() {
        let err: StudioError = CoreError::TableNotFound("table_9".to_string()).into();
        assert_eq!(err.to_string(), "Table not found: table_9");
    }
}
