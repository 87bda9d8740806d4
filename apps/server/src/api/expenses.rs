//! Expense log endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use perla_core::money::Money;
use perla_core::types::{Expense, ExpenseKind};

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseBody {
    pub kind: ExpenseKind,
    pub name: String,
    /// Amount in fen.
    pub amount: Money,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses).post(add_expense))
        .route("/expenses/:id", axum::routing::delete(delete_expense))
}

async fn list_expenses(State(state): State<Arc<AppState>>) -> Json<Vec<Expense>> {
    Json(state.studio.expenses().list())
}

async fn add_expense(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateExpenseBody>,
) -> ApiResult<Json<Expense>> {
    let expense = state.studio.expenses().add(
        body.kind,
        &body.name,
        body.amount,
        body.date,
        body.note,
    )?;
    Ok(Json(expense))
}

async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state.studio.expenses().delete(&id)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
