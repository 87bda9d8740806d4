//! # Rate Limiter
//!
//! Fixed-window per-client-IP limiting: 100 requests per 60-second window,
//! violations answered with 429. State is in-memory; a restart forgives
//! everyone, which is the right trade-off for a LAN appliance.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::audit::client_ip;
use crate::AppState;

/// Window length.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Requests allowed per client per window.
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 100;

/// Entries tolerated before expired windows get swept out.
const SWEEP_THRESHOLD: usize = 4096;

struct ClientWindow {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window request counter keyed by client identifier.
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    clients: Mutex<HashMap<String, ClientWindow>>,
}

impl RateLimiter {
    /// Creates a limiter with an explicit policy (tests use tiny windows).
    pub fn new(window: Duration, max_requests: u32) -> Self {
        RateLimiter {
            window,
            max_requests,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// The production policy: 100 requests / 60 s.
    pub fn default_policy() -> Self {
        RateLimiter::new(RATE_LIMIT_WINDOW, RATE_LIMIT_MAX_REQUESTS)
    }

    /// Counts one request for `client`; `false` means over the limit.
    pub fn check(&self, client: &str) -> bool {
        let now = Instant::now();
        let mut clients = match self.clients.lock() {
            Ok(guard) => guard,
            // A poisoned counter map is junk either way; take it and move on
            Err(poisoned) => poisoned.into_inner(),
        };

        if clients.len() > SWEEP_THRESHOLD {
            clients.retain(|_, window| window.reset_at > now);
        }

        let window = clients.entry(client.to_string()).or_insert(ClientWindow {
            count: 0,
            reset_at: now + self.window,
        });

        if now > window.reset_at {
            window.count = 0;
            window.reset_at = now + self.window;
        }

        window.count += 1;
        window.count <= self.max_requests
    }
}

/// Middleware: rejects over-limit clients with 429 before any other work.
pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    if !state.rate_limiter.check(&ip) {
        warn!(%ip, "Rate limit exceeded");
        return (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests").into_response();
    }
    next.run(request).await
}

// =============================================================================
// Unit Tests
// =============================================================================
