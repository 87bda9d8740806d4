//! # Store
//!
//! The [`Store`] hands out one typed [`Document`] per persisted collection,
//! the way the original system kept one localStorage key per collection.
//! The key strings are carried over verbatim so an exported data directory
//! maps one-to-one onto the old keys.

use std::sync::Arc;

use perla_core::config::StudioConfig;
use perla_core::types::{BeadColor, Expense, InventoryLog, Order, Table, User};

use crate::backend::{FileBackend, MemoryBackend, StorageBackend};
use crate::document::Document;
use crate::error::StoreResult;

/// The persisted document keys, one JSON document each, no cross-document
/// transactional guarantee.
pub mod keys {
    /// Studio configuration singleton.
    pub const CONFIG: &str = "perlerTimerConfig";
    /// Table/session registry.
    pub const TABLES: &str = "perlerTimerTables";
    /// Immutable order log.
    pub const ORDERS: &str = "perlerTimerOrders";
    /// Expense log.
    pub const EXPENSES: &str = "perlerTimerExpenses";
    /// Bead color stock.
    pub const BEADS: &str = "perlerTimerBeads";
    /// Inventory movement log.
    pub const INVENTORY_LOGS: &str = "perlerTimerInventoryLogs";
    /// Currently logged-in user.
    pub const CURRENT_USER: &str = "perlerTimerCurrentUser";
    /// Last timer-tick timestamp (epoch ms).
    pub const LAST_UPDATE: &str = "perlerTimerLastUpdate";
}

/// Handle to all persisted collections.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn StorageBackend>,
}

impl Store {
    /// Creates a store over any backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Store { backend }
    }

    /// Opens a file-backed store in (creating) a data directory.
    pub fn open(dir: impl Into<std::path::PathBuf>) -> StoreResult<Self> {
        Ok(Store::new(Arc::new(FileBackend::open(dir)?)))
    }

    /// Creates an in-memory store.
    ///
    /// ## Usage
    /// ```rust
    /// use perla_store::Store;
    ///
    /// let store = Store::in_memory();
    /// assert!(store.tables().load().is_empty());
    /// // Isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        Store::new(Arc::new(MemoryBackend::new()))
    }

    /// Studio configuration (defaults merge in on load).
    pub fn config(&self) -> Document<StudioConfig> {
        Document::new(self.backend.clone(), keys::CONFIG)
    }

    /// The table/session registry.
    pub fn tables(&self) -> Document<Vec<Table>> {
        Document::new(self.backend.clone(), keys::TABLES)
    }

    /// The append-only order log.
    pub fn orders(&self) -> Document<Vec<Order>> {
        Document::new(self.backend.clone(), keys::ORDERS)
    }

    /// The expense log.
    pub fn expenses(&self) -> Document<Vec<Expense>> {
        Document::new(self.backend.clone(), keys::EXPENSES)
    }

    /// Bead color stock, unique by code.
    pub fn beads(&self) -> Document<Vec<BeadColor>> {
        Document::new(self.backend.clone(), keys::BEADS)
    }

    /// The inventory movement log.
    pub fn inventory_logs(&self) -> Document<Vec<InventoryLog>> {
        Document::new(self.backend.clone(), keys::INVENTORY_LOGS)
    }

    /// The logged-in user, if any.
    pub fn current_user(&self) -> Document<Option<User>> {
        Document::new(self.backend.clone(), keys::CURRENT_USER)
    }

    /// Last timer-tick timestamp.
    pub fn last_update(&self) -> Document<Option<i64>> {
        Document::new(self.backend.clone(), keys::LAST_UPDATE)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
