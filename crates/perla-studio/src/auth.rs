//! # Auth Service
//!
//! Login, logout and admin-gated user management over the accounts stored
//! in the config document.
//!
//! ## Trust Model
//! One device inside the studio, operated by staff. Credentials are plain
//! strings compared directly; the login exists to keep the cash drawer
//! honest, not to resist an attacker with the data directory.
//!
//! Login failures always carry the same message regardless of whether the
//! username exists, so the form cannot enumerate accounts.

use tracing::info;

use perla_core::types::{Role, User};
use perla_core::validation::{validate_display_name, validate_password, validate_username};
use perla_store::Store;

use crate::error::{StudioError, StudioResult};

/// Login and user management.
#[derive(Clone)]
pub struct AuthService {
    store: Store,
}

impl AuthService {
    /// Creates the service.
    pub fn new(store: Store) -> Self {
        AuthService { store }
    }

    /// Attempts a login; on success the user becomes the persisted current
    /// user.
    pub fn login(&self, username: &str, password: &str) -> StudioResult<User> {
        let config = self.store.config().load();

        let user = config
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
            .ok_or(StudioError::InvalidCredentials)?;

        self.store.current_user().save(&Some(user.clone()))?;
        info!(username = %user.username, role = ?user.role, "User logged in");
        Ok(user)
    }

    /// Clears the current user.
    pub fn logout(&self) -> StudioResult<()> {
        self.store.current_user().clear()?;
        Ok(())
    }

    /// The persisted current user, if anyone is logged in.
    pub fn current_user(&self) -> Option<User> {
        self.store.current_user().load()
    }

    /// The current user if they are an admin; the structured permission
    /// failure otherwise. Admin-only mutations call this first and apply
    /// nothing when it fails.
    pub fn require_admin(&self) -> StudioResult<User> {
        match self.current_user() {
            Some(user) if user.is_admin() => Ok(user),
            _ => Err(StudioError::PermissionDenied),
        }
    }

    /// All accounts (admin only), passwords included: the admin screen is
    /// where forgotten passwords get looked up.
    pub fn list_users(&self) -> StudioResult<Vec<User>> {
        self.require_admin()?;
        Ok(self.store.config().load().users)
    }

    /// Adds an account (admin only).
    pub fn add_user(
        &self,
        username: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> StudioResult<User> {
        self.require_admin()?;
        validate_username(username)?;
        validate_password(password)?;
        validate_display_name("name", name)?;

        let mut config = self.store.config().load();
        if config.find_user(username).is_some() {
            return Err(perla_core::error::ValidationError::Duplicate {
                field: "username".to_string(),
                value: username.to_string(),
            }
            .into());
        }

        let user = User {
            username: username.to_string(),
            password: password.to_string(),
            role,
            name: name.to_string(),
        };
        config.users.push(user.clone());
        self.store.config().save(&config)?;

        info!(username, ?role, "User added");
        Ok(user)
    }

    /// Replaces an account's password, name and role (admin only).
    pub fn update_user(
        &self,
        username: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> StudioResult<User> {
        self.require_admin()?;
        validate_password(password)?;
        validate_display_name("name", name)?;

        let mut config = self.store.config().load();
        let user = config
            .users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or(StudioError::UserNotFound)?;

        user.password = password.to_string();
        user.name = name.to_string();
        user.role = role;
        let updated = user.clone();

        self.store.config().save(&config)?;
        info!(username, ?role, "User updated");
        Ok(updated)
    }

    /// Deletes an account (admin only). The built-in `admin` account is
    /// permanent.
    pub fn delete_user(&self, username: &str) -> StudioResult<()> {
        self.require_admin()?;

        if username == "admin" {
            return Err(StudioError::AdminUndeletable);
        }

        let mut config = self.store.config().load();
        let before = config.users.len();
        config.users.retain(|u| u.username != username);
        if config.users.len() == before {
            return Err(StudioError::UserNotFound);
        }

        self.store.config().save(&config)?;
        info!(username, "User deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
