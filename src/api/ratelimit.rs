use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::{ApiError, AppState};
use crate::config::RateLimitConfig;

#[derive(Debug, Clone)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window request counter, keyed per client. The only shared mutable
/// in-process state in the service.
#[derive(Default)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn allow(&self, key: &str, cfg: &RateLimitConfig) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;

        let window = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= Duration::from_secs(cfg.window_seconds) {
            window.started = now;
            window.count = 0;
        }

        if window.count >= cfg.max_requests {
            return false;
        }

        window.count += 1;
        true
    }
}

pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let cfg = &state.config().rate_limit;

    if !cfg.enabled {
        return Ok(next.run(request).await);
    }

    let key = client_key(&request);

    if !state.rate_limiter().allow(&key, cfg).await {
        tracing::warn!(client = %key, "Rate limit exceeded");
        return Err(ApiError::RateLimited);
    }

    Ok(next.run(request).await)
}

/// Peer address of the connection. Requests without connect info (tests
/// driving the router directly) share one bucket.
fn client_key(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_string(), |info| info.0.ip().to_string())
}
