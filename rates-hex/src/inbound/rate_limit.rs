//! Rate limiting middleware using Governor.
//!
//! Per-client token buckets keyed by peer IP address. Entries for clients
//! that go quiet are swept periodically so the map stays bounded by the
//! recently-active client set rather than every IP ever seen.

use axum::{
    Json,
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde_json::json;
use std::{
    net::SocketAddr,
    num::NonZeroU32,
    sync::Arc,
    sync::atomic::{AtomicUsize, Ordering},
    time::{Duration, Instant},
};

/// Entries idle longer than this are dropped by the sweep.
const IDLE_TTL: Duration = Duration::from_secs(600);

/// How many checks pass between sweeps.
const SWEEP_EVERY: usize = 1024;

struct ClientEntry {
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    last_seen: Instant,
}

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    /// Per-client rate limiters
    limiters: DashMap<String, ClientEntry>,
    /// Default quota for new clients
    quota: Quota,
    /// Checks since startup, drives the sweep cadence
    checks: AtomicUsize,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::new(100, Duration::from_secs(60))
    }
}

impl RateLimiterState {
    /// Creates a new rate limiter state.
    ///
    /// # Arguments
    /// * `requests` - Number of requests allowed per period
    /// * `period` - Time period for the quota
    pub fn new(requests: u32, period: Duration) -> Self {
        let quota = Quota::with_period(period)
            .unwrap()
            .allow_burst(NonZeroU32::new(requests).unwrap());

        Self {
            limiters: DashMap::new(),
            quota,
            checks: AtomicUsize::new(0),
        }
    }

    /// Checks if a request should be rate limited.
    /// Returns true if the request is allowed, false if rate limited.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        // Clone the limiter out so the entry guard is released before sweeping.
        let limiter = {
            let mut entry = self
                .limiters
                .entry(key.to_string())
                .or_insert_with(|| ClientEntry {
                    limiter: Arc::new(RateLimiter::direct(self.quota)),
                    last_seen: now,
                });
            entry.last_seen = now;
            entry.limiter.clone()
        };

        if self.checks.fetch_add(1, Ordering::Relaxed) % SWEEP_EVERY == SWEEP_EVERY - 1 {
            self.sweep_idle(IDLE_TTL);
        }

        limiter.check().is_ok()
    }

    /// Drops limiters that have not been consulted within `ttl`.
    fn sweep_idle(&self, ttl: Duration) {
        let now = Instant::now();
        self.limiters
            .retain(|_, entry| now.duration_since(entry.last_seen) < ttl);
    }
}

/// Rate limiting middleware keyed by peer IP.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Skip rate limiting for health endpoint
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let key = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    if !limiter.check(&key) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "Rate limit exceeded. Please try again later.",
                "retry_after_seconds": 60
            })),
        )
            .into_response();
    }

    next.run(request).await
}
