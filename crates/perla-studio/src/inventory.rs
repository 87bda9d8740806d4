//! # Inventory Service
//!
//! Bead stock operations: the color catalog, gram-level stock mutations
//! with an audit trail, and the low-stock/restock projections.
//!
//! Every stock mutation is one whole-document read-modify-write keyed by
//! color code, plus an appended movement log entry. Stock never goes below
//! zero; an over-consumption clamps and the log records what was actually
//! removed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use perla_core::error::CoreError;
use perla_core::inventory::{restock_suggestion, RestockSuggestion};
use perla_core::types::{BeadColor, ColorAmount, InventoryLog, InventoryLogKind};
use perla_core::validation::{validate_color_code, validate_display_name, validate_gram_amount};
use perla_store::Store;

use crate::clock::Clock;
use crate::error::StudioResult;

/// One color's row in the restock report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockLine {
    pub code: String,
    pub name: String,
    pub suggestion: RestockSuggestion,
}

/// Bead stock operations.
#[derive(Clone)]
pub struct InventoryService {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl InventoryService {
    /// Creates the service.
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        InventoryService { store, clock }
    }

    /// The color catalog with current stock.
    pub fn list_colors(&self) -> Vec<BeadColor> {
        self.store.beads().load()
    }

    /// Creates a color, or updates the name/swatch/note of an existing one.
    /// Stock is only ever changed through [`InventoryService::adjust_stock`].
    pub fn upsert_color(
        &self,
        code: &str,
        name: &str,
        color: &str,
        note: Option<String>,
    ) -> StudioResult<BeadColor> {
        validate_color_code(code)?;
        validate_display_name("name", name)?;

        let mut beads = self.store.beads().load();
        let result = match beads.iter_mut().find(|b| b.code == code) {
            Some(existing) => {
                existing.name = name.to_string();
                existing.color = color.to_string();
                existing.note = note;
                existing.clone()
            }
            None => {
                let bead = BeadColor {
                    code: code.to_string(),
                    name: name.to_string(),
                    color: color.to_string(),
                    stock_gram: 0,
                    note,
                };
                beads.push(bead.clone());
                bead
            }
        };

        self.store.beads().save(&beads)?;
        Ok(result)
    }

    /// Removes a color from the catalog. Its movement history stays in the
    /// log.
    pub fn delete_color(&self, code: &str) -> StudioResult<()> {
        let mut beads = self.store.beads().load();
        let before = beads.len();
        beads.retain(|b| b.code != code);
        if beads.len() == before {
            return Err(CoreError::ColorNotFound(code.to_string()).into());
        }
        self.store.beads().save(&beads)?;
        Ok(())
    }

    /// Moves stock in (positive delta) or out (negative delta) for one
    /// color, appending a movement log entry.
    ///
    /// Stock floors at zero; the log records the grams actually moved.
    pub fn adjust_stock(
        &self,
        code: &str,
        delta_gram: i64,
        note: Option<String>,
    ) -> StudioResult<BeadColor> {
        validate_gram_amount(delta_gram.abs())?;

        let mut beads = self.store.beads().load();
        let bead = beads
            .iter_mut()
            .find(|b| b.code == code)
            .ok_or_else(|| CoreError::ColorNotFound(code.to_string()))?;

        let previous = bead.stock_gram;
        bead.stock_gram = (previous + delta_gram).max(0);
        let moved = (bead.stock_gram - previous).abs();
        let updated = bead.clone();

        self.store.beads().save(&beads)?;

        let entry = InventoryLog {
            id: Uuid::new_v4().to_string(),
            timestamp: self.clock.now_ms(),
            kind: if delta_gram >= 0 {
                InventoryLogKind::In
            } else {
                InventoryLogKind::Out
            },
            colors: vec![ColorAmount {
                code: code.to_string(),
                gram: moved,
            }],
            note,
        };
        self.store.inventory_logs().update(|logs| logs.push(entry))?;

        info!(code, delta_gram, stock = updated.stock_gram, "Stock adjusted");
        Ok(updated)
    }

    /// Colors currently below the configured low-stock threshold.
    pub fn low_stock(&self) -> Vec<BeadColor> {
        let threshold = self.store.config().load().low_stock_threshold_gram;
        self.list_colors()
            .into_iter()
            .filter(|b| b.stock_gram < threshold)
            .collect()
    }

    /// Restock suggestions for every color below the threshold.
    pub fn restock_report(&self) -> Vec<RestockLine> {
        let threshold = self.store.config().load().low_stock_threshold_gram;
        self.list_colors()
            .into_iter()
            .filter_map(|b| {
                let suggestion = restock_suggestion(b.stock_gram, threshold);
                suggestion.need_restock.then(|| RestockLine {
                    code: b.code,
                    name: b.name,
                    suggestion,
                })
            })
            .collect()
    }

    /// The movement log, oldest first.
    pub fn logs(&self) -> Vec<InventoryLog> {
        self.store.inventory_logs().load()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::StudioError;

    fn setup() -> (Store, InventoryService) {
        let store = Store::in_memory();
        let clock = Arc::new(ManualClock::new(1_000_000));
        let inventory = InventoryService::new(store.clone(), clock);
        (store, inventory)
    }

    #[test]
    fn test_upsert_creates_then_edits() {
        let (_store, inventory) = setup();
        let created = inventory.upsert_color("A01", "樱花粉", "#ffb7c5", None).unwrap();
        assert_eq!(created.stock_gram, 0);

        let edited = inventory
            .upsert_color("A01", "樱花粉(新)", "#ffc0cb", Some("改色".to_string()))
            .unwrap();
        assert_eq!(edited.name, "樱花粉(新)");
        // Still one catalog entry, stock untouched
        let colors = inventory.list_colors();
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].stock_gram, 0);
    }

    #[test]
    fn test_bad_code_rejected() {
        let (_store, inventory) = setup();
        assert!(matches!(
            inventory.upsert_color("A 01", "x", "#fff", None).unwrap_err(),
            StudioError::Validation(_)
        ));
    }

    #[test]
    fn test_adjust_stock_in_and_out_with_log() {
        let (store, inventory) = setup();
        inventory.upsert_color("A01", "樱花粉", "#ffb7c5", None).unwrap();

        inventory.adjust_stock("A01", 130, Some("进货".to_string())).unwrap();
        let after_out = inventory.adjust_stock("A01", -26, None).unwrap();
        assert_eq!(after_out.stock_gram, 104);

        let logs = store.inventory_logs().load();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].kind, InventoryLogKind::In);
        assert_eq!(logs[0].total_gram(), 130);
        assert_eq!(logs[1].kind, InventoryLogKind::Out);
        assert_eq!(logs[1].total_gram(), 26);
    }

    #[test]
    fn test_stock_floors_at_zero() {
        let (store, inventory) = setup();
        inventory.upsert_color("A01", "樱花粉", "#ffb7c5", None).unwrap();
        inventory.adjust_stock("A01", 10, None).unwrap();

        let clamped = inventory.adjust_stock("A01", -50, None).unwrap();
        assert_eq!(clamped.stock_gram, 0);
        // The log records the 10 g that actually left the shelf
        assert_eq!(store.inventory_logs().load()[1].total_gram(), 10);
    }

    #[test]
    fn test_adjust_unknown_color_rejected() {
        let (_store, inventory) = setup();
        assert!(matches!(
            inventory.adjust_stock("Z99", 13, None).unwrap_err(),
            StudioError::Core(CoreError::ColorNotFound(_))
        ));
    }

    #[test]
    fn test_zero_delta_rejected() {
        let (_store, inventory) = setup();
        inventory.upsert_color("A01", "樱花粉", "#ffb7c5", None).unwrap();
        assert!(inventory.adjust_stock("A01", 0, None).is_err());
    }

    #[test]
    fn test_low_stock_and_restock_report() {
        let (_store, inventory) = setup();
        inventory.upsert_color("A01", "樱花粉", "#ffb7c5", None).unwrap();
        inventory.upsert_color("B03", "雾霾蓝", "#6f8fb4", None).unwrap();
        inventory.adjust_stock("A01", 100, None).unwrap();
        inventory.adjust_stock("B03", 600, None).unwrap();

        let low = inventory.low_stock();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].code, "A01");

        let report = inventory.restock_report();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].code, "A01");
        assert!(report[0].suggestion.need_restock);
        assert_eq!(report[0].suggestion.suggested_gram % 13, 0);
        assert!(report[0].suggestion.suggested_gram >= 400);
    }

    #[test]
    fn test_delete_color_keeps_history() {
        let (store, inventory) = setup();
        inventory.upsert_color("A01", "樱花粉", "#ffb7c5", None).unwrap();
        inventory.adjust_stock("A01", 13, None).unwrap();

        inventory.delete_color("A01").unwrap();
        assert!(inventory.list_colors().is_empty());
        assert_eq!(store.inventory_logs().load().len(), 1);

        assert!(inventory.delete_color("A01").is_err());
    }
}
