//! # perla-core: Pure Business Logic for Perla POS
//!
//! Perla POS is a table-timer and billing system for a perler-bead studio:
//! customers rent a table by the hour or by the day, bead stock is tracked in
//! grams and bottles, and everything settles into CSV reports. This crate is
//! the **heart** of the system - every billing, inventory and reporting rule
//! lives here as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Perla POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/server (HTTP)                           │   │
//! │  │    static assets ──► JSON API ──► CSV downloads                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 perla-studio (services)                         │   │
//! │  │    sessions, timer compensation, auth, inventory, export        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ perla-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ inventory │  │   │
//! │  │   │   Table   │  │   Money   │  │ HalfHours │  │  bottles  │  │   │
//! │  │   │   Order   │  │   Rate    │  │ PriceQuote│  │  restock  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  sharing  │  │    csv    │  │  report   │  │ validation│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK READS • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Table, Order, BeadColor, User, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`config`] - Studio configuration with merge-over-defaults loading
//! - [`pricing`] - Duration-to-price engine (half-hour buckets, discounts, fees)
//! - [`inventory`] - Gram/bottle stock math and restock suggestions
//! - [`sharing`] - Partner cost-sharing splits
//! - [`format`] - Display formatting (durations, timestamps, bottles)
//! - [`csv`] - CSV writer (BOM, quoting) for spreadsheet-compatible exports
//! - [`report`] - Fixed-schema report rows for each export type
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network and clock access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod csv;
pub mod error;
pub mod format;
pub mod inventory;
pub mod money;
pub mod pricing;
pub mod report;
pub mod sharing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use perla_core::Money` instead of
// `use perla_core::money::Money`

pub use config::StudioConfig;
pub use error::{CoreError, ValidationError};
pub use money::{Money, Rate};
pub use pricing::PriceQuote;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Grams per bottle of beads.
///
/// The studio stocks beads in 13-gram bottles; every bottle-denominated
/// display and restock suggestion derives from this constant only.
pub const GRAMS_PER_BOTTLE: i64 = 13;

/// Restock refill target in grams.
///
/// A color below the low-stock threshold is topped back up to at least this
/// amount, rounded up to whole bottles.
pub const RESTOCK_TARGET_GRAM: i64 = 500;

/// Estimated beads per gram, used only in the stock export.
pub const BEADS_PER_GRAM: i64 = 300;
