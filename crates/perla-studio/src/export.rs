//! # Export Service
//!
//! Renders the document collections into the six CSV reports and the
//! cost-sharing breakdown. Rendering is delegated to `perla_core::report`;
//! this service only loads the inputs and, on request, writes the files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use perla_core::format::date_string;
use perla_core::money::Money;
use perla_core::sharing::{split, PartnerShare};
use perla_core::report;
use perla_store::{Store, StoreError};

use crate::clock::Clock;
use crate::error::StudioResult;

/// CSV report rendering and file export.
#[derive(Clone)]
pub struct ExportService {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl ExportService {
    /// Creates the service.
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        ExportService { store, clock }
    }

    /// 拼豆库存 report.
    pub fn stock_csv(&self) -> String {
        report::stock_report(&self.store.beads().load())
    }

    /// 订单记录 report.
    pub fn orders_csv(&self) -> String {
        report::orders_report(&self.store.orders().load())
    }

    /// 费用记录 report.
    pub fn expenses_csv(&self) -> String {
        report::expenses_report(&self.store.expenses().load())
    }

    /// 库存日志 report.
    pub fn inventory_logs_csv(&self) -> String {
        report::inventory_log_report(&self.store.inventory_logs().load())
    }

    /// 日报表 for one business date ("2026-08-06"); today when omitted.
    pub fn daily_csv(&self, date: Option<&str>) -> String {
        let today = date_string(self.clock.now_ms());
        let date = date.unwrap_or(&today);
        report::daily_report(date, &self.store.orders().load(), &self.store.expenses().load())
    }

    /// 色号清单 report.
    pub fn colors_csv(&self) -> String {
        report::color_list_report(&self.store.beads().load())
    }

    /// Partner shares of takings, optionally narrowed to one business date.
    ///
    /// Total is the sum of order payments; in profit scope the matching
    /// expenses come off first. Empty when sharing is disabled.
    pub fn cost_sharing(&self, date: Option<&str>) -> Vec<PartnerShare> {
        let config = self.store.config().load();

        let total = self
            .store
            .orders()
            .load()
            .iter()
            .filter(|o| date.map_or(true, |d| o.date == d))
            .fold(Money::zero(), |sum, o| sum + o.actual_payment);

        let expenses = self
            .store
            .expenses()
            .load()
            .iter()
            .filter(|e| date.map_or(true, |d| e.date == d))
            .fold(Money::zero(), |sum, e| sum + e.amount);

        split(total, expenses, &config.cost_sharing)
    }

    /// Writes all six reports into a directory, date-stamped the way the
    /// studio names its spreadsheets. Returns the written paths.
    pub fn write_all(&self, dir: impl AsRef<Path>) -> StudioResult<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .map_err(|e| StoreError::io(dir.display().to_string(), e))?;

        let today = date_string(self.clock.now_ms());
        let reports = [
            (format!("拼豆库存_{}.csv", today), self.stock_csv()),
            (format!("订单记录_{}.csv", today), self.orders_csv()),
            (format!("费用记录_{}.csv", today), self.expenses_csv()),
            (format!("库存日志_{}.csv", today), self.inventory_logs_csv()),
            (format!("日报表_{}.csv", today), self.daily_csv(None)),
            (format!("色号清单_{}.csv", today), self.colors_csv()),
        ];

        let mut written = Vec::with_capacity(reports.len());
        for (filename, contents) in reports {
            let path = dir.join(&filename);
            std::fs::write(&path, contents).map_err(|e| StoreError::io(filename, e))?;
            written.push(path);
        }

        info!(count = written.len(), dir = %dir.display(), "Reports exported");
        Ok(written)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::expense::ExpenseService;
    use crate::session::{OpenTableRequest, SessionService};
    use perla_core::config::{CostSharing, Partner, SharingScope};
    use perla_core::types::{ChargeType, CustomerType, ExpenseKind};

    fn setup() -> (Store, Arc<ManualClock>, ExportService) {
        let store = Store::in_memory();
        let clock = Arc::new(ManualClock::new(1_786_000_000_000));
        let export = ExportService::new(store.clone(), clock.clone());
        (store, clock, export)
    }

    fn close_one_order(store: &Store, clock: &Arc<ManualClock>) {
        let sessions = SessionService::new(store.clone(), clock.clone());
        sessions.ensure_tables().unwrap();
        sessions
            .open_table(
                "table_1",
                OpenTableRequest {
                    charge_type: ChargeType::Hourly,
                    customer_type: CustomerType::Member,
                    customer_phone: None,
                    note: None,
                },
            )
            .unwrap();
        clock.advance(90 * 60_000);
        sessions.close_table("table_1").unwrap();
    }

    #[test]
    fn test_reports_render_from_documents() {
        let (store, clock, export) = setup();
        close_one_order(&store, &clock);

        let orders_csv = export.orders_csv();
        assert!(orders_csv.starts_with('\u{feff}'));
        assert!(orders_csv.contains("1号桌"));
        assert!(orders_csv.contains("20.25"));

        // Empty collections still render a header-only document
        let stock_csv = export.stock_csv();
        assert!(stock_csv.contains("色号,名称"));
        assert_eq!(stock_csv.lines().count(), 1);
    }

    #[test]
    fn test_daily_csv_defaults_to_today() {
        let (store, clock, export) = setup();
        close_one_order(&store, &clock);

        let today = date_string(clock.now_ms());
        let csv = export.daily_csv(None);
        assert!(csv.contains(&today));
        assert!(csv.contains("订单数,1"));
        assert!(csv.contains("总收入,20.25"));

        // A date with no orders reports zeros
        let empty = export.daily_csv(Some("1999-01-01"));
        assert!(empty.contains("订单数,0"));
        assert!(empty.contains("总收入,0.00"));
    }

    #[test]
    fn test_cost_sharing_over_profit() {
        let (store, clock, export) = setup();
        close_one_order(&store, &clock); // ¥20.25 takings

        let mut config = store.config().load();
        config.cost_sharing = CostSharing {
            enabled: true,
            sharing_scope: SharingScope::Profit,
            partners: vec![
                Partner {
                    name: "阿文".to_string(),
                    share_ratio: 50,
                    enabled: true,
                },
                Partner {
                    name: "小鱼".to_string(),
                    share_ratio: 50,
                    enabled: true,
                },
            ],
        };
        store.config().save(&config).unwrap();

        ExpenseService::new(store.clone(), clock.clone())
            .add(
                ExpenseKind::Other,
                "杂项",
                Money::from_cents(25),
                Some(date_string(clock.now_ms())),
                None,
            )
            .unwrap();

        // (2025 - 25) / 2 = 1000 fen each
        let shares = export.cost_sharing(None);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].amount.cents(), 1000);
        assert_eq!(shares[1].amount.cents(), 1000);
    }

    #[test]
    fn test_cost_sharing_disabled_is_empty() {
        let (store, clock, export) = setup();
        close_one_order(&store, &clock);
        assert!(export.cost_sharing(None).is_empty());
    }

    #[test]
    fn test_write_all_creates_six_files() {
        let (store, clock, export) = setup();
        close_one_order(&store, &clock);

        let dir = tempfile::tempdir().unwrap();
        let written = export.write_all(dir.path()).unwrap();
        assert_eq!(written.len(), 6);
        for path in &written {
            assert!(path.exists());
            let contents = std::fs::read_to_string(path).unwrap();
            assert!(contents.starts_with('\u{feff}'));
        }
    }
}
