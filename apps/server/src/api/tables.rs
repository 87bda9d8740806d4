//! Table/session lifecycle endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use perla_core::types::{ChargeType, CustomerType, Order, Table};
use perla_studio::session::OpenTableRequest;

use crate::error::ApiResult;
use crate::AppState;

/// A table plus its live elapsed time, so the floor plan can render a
/// ticking timer without duplicating the pause rules client-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    #[serde(flatten)]
    pub table: Table,
    pub elapsed_ms: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenTableBody {
    pub charge_type: ChargeType,
    pub customer_type: CustomerType,
    pub customer_phone: Option<String>,
    pub note: Option<String>,
}

impl Default for OpenTableBody {
    fn default() -> Self {
        OpenTableBody {
            charge_type: ChargeType::Hourly,
            customer_type: CustomerType::Normal,
            customer_phone: None,
            note: None,
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tables", get(list_tables))
        .route("/tables/:id/open", post(open_table))
        .route("/tables/:id/pause", post(pause_table))
        .route("/tables/:id/resume", post(resume_table))
        .route("/tables/:id/close", post(close_table))
        .route("/orders", get(list_orders))
}

fn view(table: Table, now_ms: i64) -> TableView {
    let elapsed_ms = table.elapsed_ms(now_ms);
    TableView { table, elapsed_ms }
}

async fn list_tables(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<TableView>>> {
    let tables = state.studio.sessions().ensure_tables()?;
    let now = state.studio.clock().now_ms();
    Ok(Json(tables.into_iter().map(|t| view(t, now)).collect()))
}

async fn open_table(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<OpenTableBody>,
) -> ApiResult<Json<TableView>> {
    let table = state.studio.sessions().open_table(
        &id,
        OpenTableRequest {
            charge_type: body.charge_type,
            customer_type: body.customer_type,
            customer_phone: body.customer_phone,
            note: body.note,
        },
    )?;
    let now = state.studio.clock().now_ms();
    Ok(Json(view(table, now)))
}

async fn pause_table(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<TableView>> {
    let table = state.studio.sessions().pause_table(&id)?;
    let now = state.studio.clock().now_ms();
    Ok(Json(view(table, now)))
}

async fn resume_table(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<TableView>> {
    let table = state.studio.sessions().resume_table(&id)?;
    let now = state.studio.clock().now_ms();
    Ok(Json(view(table, now)))
}

async fn close_table(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.studio.sessions().close_table(&id)?))
}

async fn list_orders(State(state): State<Arc<AppState>>) -> Json<Vec<Order>> {
    Json(state.studio.sessions().orders())
}
