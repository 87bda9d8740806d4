//! # Timer Service
//!
//! Keeps the billed elapsed time of every running table honest across
//! process suspensions and restarts.
//!
//! ## The Problem
//! `now - start_time` is only correct while the process is actually
//! running. When the host sleeps, is backgrounded, or the server restarts,
//! wall-clock time keeps passing but nobody was at the table being billed
//! for it.
//!
//! ## The Mechanism
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               Suspension-Gap Compensation                               │
//! │                                                                         │
//! │  tick  tick  tick │░░░░░ suspended (gap G) ░░░░░│ resume               │
//! │    │     │     │                                    │                   │
//! │    └── every second: last_update := now             │                   │
//! │                                                     ▼                   │
//! │                        gap = now - last_update                          │
//! │                        gap > 5s?  start_time += gap                     │
//! │                        (every InUse, unpaused table)                    │
//! │                                                                         │
//! │  Result: now - start_time is identical before and after the gap;       │
//! │  suspended wall-clock is never billed.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Gaps of 5 seconds or less are ordinary scheduling jitter and are billed
//! normally.
//!
//! ## Failure Mode
//! Storage trouble makes every method here a logged no-op. A billing tick
//! must never take the application down.

use std::sync::Arc;

use tracing::{info, warn};

use perla_store::Store;

use crate::clock::Clock;

/// Gap size above which the process is considered to have been suspended.
pub const SUSPEND_THRESHOLD_MS: i64 = 5_000;

/// Tick persistence and suspension-gap compensation.
#[derive(Clone)]
pub struct TimerService {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl TimerService {
    /// Creates the service.
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        TimerService { store, clock }
    }

    /// Persists "now" as the last-update watermark.
    ///
    /// Called once per second by the host binary. Failures are logged and
    /// swallowed.
    pub fn record_tick(&self) {
        let now = self.clock.now_ms();
        if let Err(e) = self.store.last_update().save(&Some(now)) {
            warn!(error = %e, "Failed to persist timer tick");
        }
    }

    /// Reconciles elapsed time after a resume or restart.
    ///
    /// Computes the gap since the last persisted tick; a gap above
    /// [`SUSPEND_THRESHOLD_MS`] shifts `start_time` forward by the gap on
    /// every running table, so `now - start_time` is unaffected by the
    /// suspension. Updates the watermark either way.
    ///
    /// Returns the compensated gap in ms (0 when nothing was shifted).
    /// Never fails: storage trouble leaves everything as it was.
    pub fn compensate(&self) -> i64 {
        let now = self.clock.now_ms();
        let last_update = self.store.last_update().load();

        let compensated = match last_update {
            Some(last) if now - last > SUSPEND_THRESHOLD_MS => {
                let gap = now - last;
                match self.shift_running_tables(gap) {
                    Ok(shifted) if shifted > 0 => {
                        info!(gap_ms = gap, tables = shifted, "Compensated suspension gap");
                        gap
                    }
                    Ok(_) => gap,
                    Err(e) => {
                        warn!(error = %e, "Gap compensation failed, leaving tables as-is");
                        0
                    }
                }
            }
            _ => 0,
        };

        if let Err(e) = self.store.last_update().save(&Some(now)) {
            warn!(error = %e, "Failed to persist timer watermark");
        }

        compensated
    }

    /// Shifts `start_time` forward on every running table; returns how many
    /// tables were shifted.
    fn shift_running_tables(&self, gap_ms: i64) -> perla_store::StoreResult<usize> {
        self.store.tables().update(|tables| {
            let mut shifted = 0;
            for table in tables.iter_mut() {
                if table.is_running() {
                    if let Some(start) = table.start_time {
                        table.start_time = Some(start + gap_ms);
                        shifted += 1;
                    }
                }
            }
            shifted
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
