//! # Session Service
//!
//! The table registry and the session lifecycle: seed tables, open a
//! session, pause/resume, and close it into an immutable order.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Table Session Lifecycle                                 │
//! │                                                                         │
//! │            open_table          pause          resume                    │
//! │   Free ───────────────► InUse ───────► InUse ───────► InUse            │
//! │    ▲                   (running)      (paused)       (running)          │
//! │    │                                                     │              │
//! │    └──────────────────── close_table ◄───────────────────┘              │
//! │                     duration → pricing → Order                          │
//! │                                                                         │
//! │  pause stamps pause_time; resume shifts start_time forward by the       │
//! │  paused span, so paused wall-clock is never billed. A table closed      │
//! │  while paused bills up to its pause point.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations are whole-document read-modify-write; a rejected operation
//! writes nothing.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use perla_core::error::CoreError;
use perla_core::format::date_string;
use perla_core::pricing;
use perla_core::types::{ChargeType, CustomerType, Order, Table, TableStatus};
use perla_store::Store;

use crate::clock::Clock;
use crate::error::{StudioError, StudioResult};

/// Everything the door asks for when a session opens.
#[derive(Debug, Clone)]
pub struct OpenTableRequest {
    pub charge_type: ChargeType,
    pub customer_type: CustomerType,
    pub customer_phone: Option<String>,
    pub note: Option<String>,
}

/// Table registry and session lifecycle.
#[derive(Clone)]
pub struct SessionService {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    /// Creates the service.
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        SessionService { store, clock }
    }

    /// Seeds the registry with `table_count` free tables if it is empty.
    ///
    /// Idempotent: an already-seeded registry is returned untouched, so a
    /// restart never clobbers live sessions.
    pub fn ensure_tables(&self) -> StudioResult<Vec<Table>> {
        let existing = self.store.tables().load();
        if !existing.is_empty() {
            return Ok(existing);
        }

        let count = self.store.config().load().table_count;
        let tables: Vec<Table> = (1..=count)
            .map(|i| Table::new(format!("table_{}", i), format!("{}号桌", i)))
            .collect();

        self.store.tables().save(&tables)?;
        info!(count, "Seeded table registry");
        Ok(tables)
    }

    /// All tables, current state.
    pub fn list(&self) -> Vec<Table> {
        self.store.tables().load()
    }

    /// One table by id.
    pub fn get(&self, table_id: &str) -> StudioResult<Table> {
        self.list()
            .into_iter()
            .find(|t| t.id == table_id)
            .ok_or_else(|| CoreError::TableNotFound(table_id.to_string()).into())
    }

    /// Opens a session on a free table.
    pub fn open_table(&self, table_id: &str, request: OpenTableRequest) -> StudioResult<Table> {
        let now = self.clock.now_ms();

        let mut tables = self.store.tables().load();
        let table = find_mut(&mut tables, table_id)?;

        if table.is_in_use() {
            return Err(invalid_state(table, "in-use"));
        }

        table.status = TableStatus::InUse;
        table.start_time = Some(now);
        table.pause_time = None;
        table.paused = false;
        table.charge_type = Some(request.charge_type);
        table.customer_type = Some(request.customer_type);
        table.customer_phone = request.customer_phone;
        table.note = request.note;

        let opened = table.clone();
        self.store.tables().save(&tables)?;
        info!(table = %opened.name, charge = ?opened.charge_type, "Session opened");
        Ok(opened)
    }

    /// Freezes accrual on a running table.
    pub fn pause_table(&self, table_id: &str) -> StudioResult<Table> {
        let now = self.clock.now_ms();

        let mut tables = self.store.tables().load();
        let table = find_mut(&mut tables, table_id)?;

        if !table.is_in_use() {
            return Err(invalid_state(table, "free"));
        }
        if table.paused {
            return Err(invalid_state(table, "paused"));
        }

        table.paused = true;
        table.pause_time = Some(now);

        let paused = table.clone();
        self.store.tables().save(&tables)?;
        Ok(paused)
    }

    /// Unfreezes a paused table.
    ///
    /// `start_time` moves forward by the paused span so the pause never
    /// shows up in the bill.
    pub fn resume_table(&self, table_id: &str) -> StudioResult<Table> {
        let now = self.clock.now_ms();

        let mut tables = self.store.tables().load();
        let table = find_mut(&mut tables, table_id)?;

        if !table.is_in_use() {
            return Err(invalid_state(table, "free"));
        }
        if !table.paused {
            return Err(invalid_state(table, "running"));
        }

        let paused_span = table.pause_time.map(|p| (now - p).max(0)).unwrap_or(0);
        if let Some(start) = table.start_time {
            table.start_time = Some(start + paused_span);
        }
        table.paused = false;
        table.pause_time = None;

        let resumed = table.clone();
        self.store.tables().save(&tables)?;
        Ok(resumed)
    }

    /// Closes a session: prices the elapsed time, appends the order, frees
    /// the table.
    ///
    /// The order log and the table registry are separate documents with no
    /// cross-document transaction; the order is appended first because the
    /// billing record is the part that must not be lost.
    pub fn close_table(&self, table_id: &str) -> StudioResult<Order> {
        let now = self.clock.now_ms();
        let config = self.store.config().load();

        let mut tables = self.store.tables().load();
        let table = find_mut(&mut tables, table_id)?;

        if !table.is_in_use() {
            return Err(invalid_state(table, "free"));
        }
        let start = table
            .start_time
            .ok_or_else(|| invalid_state(table, "in-use without a start time"))?;

        // A paused table bills up to its pause point
        let end = if table.paused {
            table.pause_time.unwrap_or(now)
        } else {
            now
        };
        let duration_ms = (end - start).max(0);

        let charge_type = table.charge_type.unwrap_or_default();
        let customer_type = table.customer_type.unwrap_or_default();
        let quote = pricing::quote(duration_ms, charge_type, customer_type, &config);

        let order = Order {
            id: Uuid::new_v4().to_string(),
            date: date_string(end),
            table_name: table.name.clone(),
            charge_type,
            customer_type,
            start_time: start,
            end_time: end,
            duration_ms,
            original_price: quote.original_price,
            discount: quote.discount,
            actual_payment: quote.actual_payment,
            platform_fee: quote.platform_fee,
            net_income: quote.net_income,
            note: table.note.clone(),
        };

        self.store.orders().update(|orders| orders.push(order.clone()))?;

        table.reset();
        self.store.tables().save(&tables)?;

        info!(
            table = %order.table_name,
            payment = %order.actual_payment,
            duration = duration_ms,
            "Session closed"
        );
        Ok(order)
    }

    /// The order log, oldest first.
    pub fn orders(&self) -> Vec<Order> {
        self.store.orders().load()
    }
}

fn find_mut<'a>(tables: &'a mut [Table], table_id: &str) -> StudioResult<&'a mut Table> {
    tables
        .iter_mut()
        .find(|t| t.id == table_id)
        .ok_or_else(|| CoreError::TableNotFound(table_id.to_string()).into())
}

fn invalid_state(table: &Table, state: &str) -> StudioError {
    CoreError::InvalidTableState {
        table_id: table.id.clone(),
        current_state: state.to_string(),
    }
    .into()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use perla_core::money::Money;

    const MINUTE: i64 = 60_000;

    fn setup() -> (Store, Arc<ManualClock>, SessionService) {
        let store = Store::in_memory();
        let clock = Arc::new(ManualClock::new(1_000_000));
        let sessions = SessionService::new(store.clone(), clock.clone());
        sessions.ensure_tables().unwrap();
        (store, clock, sessions)
    }

    fn open_request(charge: ChargeType, customer: CustomerType) -> OpenTableRequest {
        OpenTableRequest {
            charge_type: charge,
            customer_type: customer,
            customer_phone: None,
            note: None,
        }
    }

    #[test]
    fn test_ensure_tables_seeds_once() {
        let (store, _clock, sessions) = setup();
        let tables = store.tables().load();
        assert_eq!(tables.len(), 30);
        assert_eq!(tables[0].name, "1号桌");
        assert_eq!(tables[29].id, "table_30");

        // Re-running leaves live state alone
        sessions
            .open_table("table_1", open_request(ChargeType::Hourly, CustomerType::Normal))
            .unwrap();
        sessions.ensure_tables().unwrap();
        assert!(store.tables().load()[0].is_in_use());
    }

    #[test]
    fn test_open_sets_session_state() {
        let (_store, clock, sessions) = setup();
        let table = sessions
            .open_table("table_3", open_request(ChargeType::Hourly, CustomerType::Member))
            .unwrap();

        assert_eq!(table.status, TableStatus::InUse);
        assert_eq!(table.start_time, Some(clock.now_ms()));
        assert!(!table.paused);
        assert_eq!(table.customer_type, Some(CustomerType::Member));
    }

    #[test]
    fn test_open_twice_is_rejected() {
        let (_store, _clock, sessions) = setup();
        sessions
            .open_table("table_3", open_request(ChargeType::Hourly, CustomerType::Normal))
            .unwrap();
        let err = sessions
            .open_table("table_3", open_request(ChargeType::Hourly, CustomerType::Normal))
            .unwrap_err();
        assert!(matches!(
            err,
            StudioError::Core(CoreError::InvalidTableState { .. })
        ));
    }

    #[test]
    fn test_unknown_table_is_rejected() {
        let (_store, _clock, sessions) = setup();
        let err = sessions.pause_table("table_99").unwrap_err();
        assert!(matches!(err, StudioError::Core(CoreError::TableNotFound(_))));
    }

    #[test]
    fn test_pause_freezes_and_resume_shifts() {
        let (_store, clock, sessions) = setup();
        let opened = sessions
            .open_table("table_1", open_request(ChargeType::Hourly, CustomerType::Normal))
            .unwrap();
        let start = opened.start_time.unwrap();

        clock.advance(30 * MINUTE);
        sessions.pause_table("table_1").unwrap();

        clock.advance(45 * MINUTE); // a long lunch, unbilled
        let resumed = sessions.resume_table("table_1").unwrap();

        // start_time moved forward by exactly the paused span
        assert_eq!(resumed.start_time, Some(start + 45 * MINUTE));
        assert_eq!(resumed.elapsed_ms(clock.now_ms()), 30 * MINUTE);
    }

    #[test]
    fn test_double_pause_and_blind_resume_are_rejected() {
        let (_store, _clock, sessions) = setup();
        sessions
            .open_table("table_1", open_request(ChargeType::Hourly, CustomerType::Normal))
            .unwrap();

        sessions.pause_table("table_1").unwrap();
        assert!(sessions.pause_table("table_1").is_err());

        sessions.resume_table("table_1").unwrap();
        assert!(sessions.resume_table("table_1").is_err());
        assert!(sessions.resume_table("table_2").is_err()); // never opened
    }

    #[test]
    fn test_close_prices_and_frees_the_table() {
        let (store, clock, sessions) = setup();
        sessions
            .open_table("table_5", open_request(ChargeType::Hourly, CustomerType::Member))
            .unwrap();

        clock.advance(90 * MINUTE);
        let order = sessions.close_table("table_5").unwrap();

        // 1.5h × ¥15 × 90%
        assert_eq!(order.actual_payment, Money::from_cents(2025));
        assert_eq!(order.duration_ms, 90 * MINUTE);
        assert_eq!(order.table_name, "5号桌");

        let table = store
            .tables()
            .load()
            .into_iter()
            .find(|t| t.id == "table_5")
            .unwrap();
        assert_eq!(table.status, TableStatus::Free);
        assert!(table.start_time.is_none());

        assert_eq!(store.orders().load().len(), 1);
    }

    #[test]
    fn test_close_daily_ignores_duration() {
        let (_store, clock, sessions) = setup();
        sessions
            .open_table("table_2", open_request(ChargeType::Daily, CustomerType::Vip))
            .unwrap();
        clock.advance(7 * 60 * MINUTE);
        let order = sessions.close_table("table_2").unwrap();

        assert_eq!(order.actual_payment, Money::from_cents(4000)); // ¥50 × 80%
        assert_eq!(order.duration_ms, 7 * 60 * MINUTE); // still recorded
    }

    #[test]
    fn test_close_while_paused_bills_to_pause_point() {
        let (_store, clock, sessions) = setup();
        sessions
            .open_table("table_1", open_request(ChargeType::Hourly, CustomerType::Normal))
            .unwrap();

        clock.advance(60 * MINUTE);
        sessions.pause_table("table_1").unwrap();
        clock.advance(3 * 60 * MINUTE); // forgotten overnight

        let order = sessions.close_table("table_1").unwrap();
        assert_eq!(order.duration_ms, 60 * MINUTE);
        assert_eq!(order.actual_payment, Money::from_cents(1500));
    }

    #[test]
    fn test_close_free_table_is_rejected() {
        let (_store, _clock, sessions) = setup();
        assert!(sessions.close_table("table_1").is_err());
    }
}
