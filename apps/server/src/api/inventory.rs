//! Bead stock endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use perla_core::types::{BeadColor, InventoryLog};
use perla_studio::inventory::RestockLine;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertColorBody {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockBody {
    /// Positive grams in, negative grams out.
    pub delta_gram: i64,
    #[serde(default)]
    pub note: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/beads", get(list_colors).post(upsert_color))
        .route("/beads/low-stock", get(low_stock))
        .route("/beads/restock", get(restock_report))
        .route("/beads/:code", axum::routing::delete(delete_color))
        .route("/beads/:code/adjust", post(adjust_stock))
        .route("/inventory-logs", get(list_logs))
}

async fn list_colors(State(state): State<Arc<AppState>>) -> Json<Vec<BeadColor>> {
    Json(state.studio.inventory().list_colors())
}

async fn upsert_color(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UpsertColorBody>,
) -> ApiResult<Json<BeadColor>> {
    let bead = state
        .studio
        .inventory()
        .upsert_color(&body.code, &body.name, &body.color, body.note)?;
    Ok(Json(bead))
}

async fn delete_color(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state.studio.inventory().delete_color(&code)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

async fn adjust_stock(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(body): Json<AdjustStockBody>,
) -> ApiResult<Json<BeadColor>> {
    let bead = state
        .studio
        .inventory()
        .adjust_stock(&code, body.delta_gram, body.note)?;
    Ok(Json(bead))
}

async fn low_stock(State(state): State<Arc<AppState>>) -> Json<Vec<BeadColor>> {
    Json(state.studio.inventory().low_stock())
}

async fn restock_report(State(state): State<Arc<AppState>>) -> Json<Vec<RestockLine>> {
    Json(state.studio.inventory().restock_report())
}

async fn list_logs(State(state): State<Arc<AppState>>) -> Json<Vec<InventoryLog>> {
    Json(state.studio.inventory().logs())
}
