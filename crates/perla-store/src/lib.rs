//! # perla-store: Persistence Layer for Perla POS
//!
//! Whole-document JSON storage. The original deployment kept every
//! collection as one JSON blob under a string key; this crate keeps that
//! model (it matches the single-writer, single-device design) and hides the
//! actual medium behind [`StorageBackend`], so the business code never knows
//! whether a document lives in a file, in memory, or somewhere else.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Perla POS Data Flow                              │
//! │                                                                         │
//! │  Service call (close_table, adjust_stock, ...)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     perla-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Store     │    │  Document<T>  │    │   Backends   │  │   │
//! │  │   │  (store.rs)   │───►│ (document.rs) │───►│ (backend.rs) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ tables()      │    │ load()        │    │ FileBackend  │  │   │
//! │  │   │ orders()      │    │ save()        │    │ MemoryBackend│  │   │
//! │  │   │ config() ...  │    │ update()      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  data/perlerTimerTables.json, data/perlerTimerOrders.json, ...         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Absent Means Empty
//! Readers never see a storage fault: an absent, unreadable or malformed
//! document loads as the type's default (empty collection, default config).
//! Writes do surface errors to the caller.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use perla_store::Store;
//!
//! let store = Store::open("./data")?;
//! let mut tables = store.tables().load();
//! tables.push(Table::new("table_1", "1号桌"));
//! store.tables().save(&tables)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod document;
pub mod error;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use document::Document;
pub use error::{StoreError, StoreResult};
pub use store::{keys, Store};
