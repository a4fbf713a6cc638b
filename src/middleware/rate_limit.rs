//! Per-client rate limiting

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter,
};
use serde_json::json;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::RateLimitConfig;

type KeyedLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Quota of `max_requests` per window, tracked per client IP
pub struct RateLimitState {
    limiter: KeyedLimiter,
}

impl RateLimitState {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let burst = NonZeroU32::new(max_requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(window / burst.get())
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, Duration::from_secs(config.window_secs))
    }

    /// Consume one request for `client`; false once the quota is spent
    pub fn check(&self, client: IpAddr) -> bool {
        self.limiter.check_key(&client).is_ok()
    }

    /// Forget clients whose quota has fully replenished
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Prune idle clients every `period` until the state is dropped.
    /// Does nothing outside a tokio runtime.
    pub fn spawn_cleanup(state: &Arc<Self>, period: Duration) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("No async runtime, rate limit cleanup disabled");
                return;
            }
        };

        let weak = Arc::downgrade(state);
        handle.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // the first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(state) = weak.upgrade() else { break };
                state.retain_recent();
                debug!(clients = state.tracked_clients(), "Pruned rate limit state");
            }
        });
    }
}

/// Middleware rejecting clients that exceed their quota with 429
pub async fn rate_limit(
    State(state): State<Arc<RateLimitState>>,
    request: Request,
    next: Next,
) -> Response {
    // requests without connection info (e.g. in-process tests) share one bucket
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if state.check(client) {
        return next.run(request).await;
    }

    warn!(client = %client, path = %request.uri().path(), "Rate limit exceeded");
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({
            "status": "error",
            "success": false,
            "message": "Too many requests from this IP, please try again later.",
        })),
    )
        .into_response()
}
