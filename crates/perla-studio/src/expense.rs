//! # Expense Service
//!
//! The operating-expense log: rent, purchasing, utilities, wages. Feeds the
//! daily report's profit line and the profit-scoped cost-sharing base.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use perla_core::error::ValidationError;
use perla_core::format::date_string;
use perla_core::money::Money;
use perla_core::types::{Expense, ExpenseKind};
use perla_core::validation::validate_display_name;
use perla_store::Store;

use crate::clock::Clock;
use crate::error::StudioResult;

/// Expense log operations.
#[derive(Clone)]
pub struct ExpenseService {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl ExpenseService {
    /// Creates the service.
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        ExpenseService { store, clock }
    }

    /// Records an expense, dated today (studio-local) unless a date is
    /// given.
    pub fn add(
        &self,
        kind: ExpenseKind,
        name: &str,
        amount: Money,
        date: Option<String>,
        note: Option<String>,
    ) -> StudioResult<Expense> {
        validate_display_name("name", name)?;
        if amount.cents() <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "amount".to_string(),
            }
            .into());
        }

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            date: date.unwrap_or_else(|| date_string(self.clock.now_ms())),
            kind,
            name: name.to_string(),
            amount,
            note,
        };

        self.store
            .expenses()
            .update(|expenses| expenses.push(expense.clone()))?;

        info!(kind = ?expense.kind, amount = %expense.amount, "Expense recorded");
        Ok(expense)
    }

    /// The expense log, oldest first.
    pub fn list(&self) -> Vec<Expense> {
        self.store.expenses().load()
    }

    /// Deletes an expense by id. Deleting an unknown id is a no-op (the
    /// entry is already gone).
    pub fn delete(&self, id: &str) -> StudioResult<()> {
        self.store
            .expenses()
            .update(|expenses| expenses.retain(|e| e.id != id))?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
