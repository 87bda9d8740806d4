//! # JSON API
//!
//! The UI-event ingress: every button in the web UI lands on one of these
//! routes and is carried out by a perla-studio service. One module per
//! domain, assembled under `/api`.
//!
//! ## Route Map
//! ```text
//! /api/auth/...      login, logout, me
//! /api/users/...     admin-gated account management
//! /api/tables/...    session lifecycle        /api/orders   the order log
//! /api/beads/...     stock + restock          /api/inventory-logs
//! /api/expenses/...  expense log
//! /api/export/...    CSV downloads            /api/reports/sharing
//! /api/config        studio configuration
//! ```

pub mod auth;
pub mod config;
pub mod expenses;
pub mod inventory;
pub mod reports;
pub mod tables;

use std::sync::Arc;

use axum::Router;

use crate::AppState;

/// Builds the `/api` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(auth::router())
        .merge(config::router())
        .merge(expenses::router())
        .merge(inventory::router())
        .merge(reports::router())
        .merge(tables::router())
}
