//! # Static File Serving
//!
//! Serves the studio's web UI from the configured web root.
//!
//! ## Behavior
//! - `/` serves `index.html`
//! - a path that tries to escape the web root → 403
//! - a missing file → 404
//! - an unreadable file → 500
//! - content type by extension, `application/octet-stream` otherwise
//!
//! Error pages carry the same Chinese bodies the studio's old server sent.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use crate::AppState;

/// Resolves a request path to a relative file path, or `None` for anything
/// that steps outside the root (absolute paths, `..` components).
fn sanitize_path(request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    let relative = if trimmed.is_empty() {
        "index.html"
    } else {
        trimmed
    };

    let mut clean = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            // "." adds nothing; anything else is an escape attempt
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if clean.as_os_str().is_empty() {
        return None;
    }
    Some(clean)
}

/// Content type by file extension (the set the web UI actually ships).
fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") => "image/jpg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Fallback handler: everything that is not `/api/...` is a static asset.
pub async fn serve(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let Some(relative) = sanitize_path(request.uri().path()) else {
        return (StatusCode::FORBIDDEN, Html("<h1>403 - 禁止访问</h1>")).into_response();
    };

    let full_path = state.config.web_root.join(&relative);

    match tokio::fs::read(&full_path).await {
        Ok(contents) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(&relative))],
            contents,
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            (StatusCode::NOT_FOUND, Html("<h1>404 - 文件未找到</h1>")).into_response()
        }
        Err(e) => {
            error!(path = %full_path.display(), error = %e, "Static file read failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>500 - 服务器错误</h1>"),
            )
                .into_response()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
