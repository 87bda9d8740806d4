//! Studio configuration endpoints.
//!
//! Reading is open (the UI header needs the shop name before anyone logs
//! in; the whole document lived client-side in the previous deployment).
//! Writing is admin-gated and replaces the whole document, which is the
//! storage model everywhere else too.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use perla_core::config::StudioConfig;
use perla_studio::StudioError;

use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/config", get(get_config).put(put_config))
}

async fn get_config(State(state): State<Arc<AppState>>) -> Json<StudioConfig> {
    Json(state.studio.store().config().load())
}

async fn put_config(
    State(state): State<Arc<AppState>>,
    Json(config): Json<StudioConfig>,
) -> ApiResult<Json<StudioConfig>> {
    state.studio.auth().require_admin()?;
    state
        .studio
        .store()
        .config()
        .save(&config)
        .map_err(StudioError::from)?;
    Ok(Json(config))
}
