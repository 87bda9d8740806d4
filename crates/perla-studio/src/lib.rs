//! # perla-studio: Application Services for Perla POS
//!
//! Orchestrates perla-core rules over perla-store documents. Each service is
//! a thin, stateless handle (the documents are the state); the [`Studio`]
//! facade wires them all to one store and one clock.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    A Session's Life                                     │
//! │                                                                         │
//! │  open_table ──► Table{InUse, start_time=now}                           │
//! │       │                                                                 │
//! │       │   every second: TimerService::record_tick                       │
//! │       │   on resume:    TimerService::compensate (gap > 5s shifts      │
//! │       │                 start_time so the gap is never billed)          │
//! │       │                                                                 │
//! │  pause/resume ──► freeze / unfreeze accrual                            │
//! │       │                                                                 │
//! │  close_table ──► pricing::quote ──► Order appended ──► table reset     │
//! │                                         │                               │
//! │                               ExportService ──► CSV reports             │
//! │└────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`clock`] - Injectable time source (system and manual clocks)
//! - [`timer`] - Tick persistence and suspension-gap compensation
//! - [`session`] - Table registry and session lifecycle
//! - [`auth`] - Login, logout, admin-gated user management
//! - [`inventory`] - Stock mutations with movement logging
//! - [`expense`] - Expense log
//! - [`export`] - CSV report rendering and file export
//! - [`error`] - Service error type

pub mod auth;
pub mod clock;
pub mod error;
pub mod expense;
pub mod export;
pub mod inventory;
pub mod session;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{StudioError, StudioResult};

use std::sync::Arc;

use perla_store::Store;

use crate::auth::AuthService;
use crate::expense::ExpenseService;
use crate::export::ExportService;
use crate::inventory::InventoryService;
use crate::session::SessionService;
use crate::timer::TimerService;

/// The wired application: one store, one clock, all services.
///
/// ## Usage
/// ```rust
/// use std::sync::Arc;
/// use perla_store::Store;
/// use perla_studio::{Studio, SystemClock};
///
/// let studio = Studio::new(Store::in_memory(), Arc::new(SystemClock));
/// studio.sessions().ensure_tables().unwrap();
/// ```
#[derive(Clone)]
pub struct Studio {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl Studio {
    /// Wires a store and a clock into a studio.
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        Studio { store, clock }
    }

    /// The underlying document store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The injected clock.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Table registry and session lifecycle.
    pub fn sessions(&self) -> SessionService {
        SessionService::new(self.store.clone(), self.clock.clone())
    }

    /// Tick persistence and suspension compensation.
    pub fn timer(&self) -> TimerService {
        TimerService::new(self.store.clone(), self.clock.clone())
    }

    /// Login and user management.
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.store.clone())
    }

    /// Bead stock operations.
    pub fn inventory(&self) -> InventoryService {
        InventoryService::new(self.store.clone(), self.clock.clone())
    }

    /// Expense log.
    pub fn expenses(&self) -> ExpenseService {
        ExpenseService::new(self.store.clone(), self.clock.clone())
    }

    /// CSV reports.
    pub fn export(&self) -> ExportService {
        ExportService::new(self.store.clone(), self.clock.clone())
    }
}
