//! CSV export downloads and the cost-sharing breakdown.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use perla_core::sharing::PartnerShare;

use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    /// Business date ("2026-08-06"); today when omitted.
    pub date: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/export/stock", get(export_stock))
        .route("/export/orders", get(export_orders))
        .route("/export/expenses", get(export_expenses))
        .route("/export/inventory-logs", get(export_inventory_logs))
        .route("/export/daily", get(export_daily))
        .route("/export/colors", get(export_colors))
        .route("/reports/sharing", get(sharing))
}

/// Wraps a rendered report as a CSV download.
fn csv_download(filename: &str, csv: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
}

async fn export_stock(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    csv_download("stock.csv", state.studio.export().stock_csv())
}

async fn export_orders(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    csv_download("orders.csv", state.studio.export().orders_csv())
}

async fn export_expenses(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    csv_download("expenses.csv", state.studio.export().expenses_csv())
}

async fn export_inventory_logs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    csv_download(
        "inventory-logs.csv",
        state.studio.export().inventory_logs_csv(),
    )
}

async fn export_daily(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> impl IntoResponse {
    csv_download(
        "daily.csv",
        state.studio.export().daily_csv(query.date.as_deref()),
    )
}

async fn export_colors(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    csv_download("colors.csv", state.studio.export().colors_csv())
}

async fn sharing(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Json<Vec<PartnerShare>> {
    Json(state.studio.export().cost_sharing(query.date.as_deref()))
}
