//! Auth and account-management endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use perla_core::types::{Role, User};

use crate::error::ApiResult;
use crate::AppState;

/// An account as the frontend sees it: no password on the wire except on
/// the admin screen's explicit listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub username: String,
    pub name: String,
    pub role: Role,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            username: user.username,
            name: user.name,
            role: user.role,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    pub password: String,
    pub name: String,
    pub role: Role,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/users", get(list_users).post(add_user))
        .route("/users/:username", put(update_user).delete(delete_user))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> ApiResult<Json<UserView>> {
    let user = state.studio.auth().login(&body.username, &body.password)?;
    Ok(Json(user.into()))
}

async fn logout(State(state): State<Arc<AppState>>) -> ApiResult<Json<serde_json::Value>> {
    state.studio.auth().logout()?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

async fn me(State(state): State<Arc<AppState>>) -> Json<Option<UserView>> {
    Json(state.studio.auth().current_user().map(UserView::from))
}

/// Full accounts, passwords included - the admin screen doubles as the
/// forgotten-password lookup. Admin-gated in the service.
async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.studio.auth().list_users()?))
}

async fn add_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserBody>,
) -> ApiResult<Json<UserView>> {
    let user = state
        .studio
        .auth()
        .add_user(&body.username, &body.password, &body.name, body.role)?;
    Ok(Json(user.into()))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Json(body): Json<UpdateUserBody>,
) -> ApiResult<Json<UserView>> {
    let user = state
        .studio
        .auth()
        .update_user(&username, &body.password, &body.name, body.role)?;
    Ok(Json(user.into()))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state.studio.auth().delete_user(&username)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
