//! Login rate limiting middleware.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    num::NonZeroU32,
    sync::{Arc, RwLock},
    time::Duration,
};

use crate::web::error::WebError;
use crate::web::handlers::AppState;

/// Per-IP rate limiter using Governor.
pub type IpRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// State for login rate limiting.
pub struct RateLimitState {
    /// Per-IP rate limiters for login submissions.
    login_limiters: RwLock<HashMap<String, Arc<IpRateLimiter>>>,
    /// Login attempts allowed per minute.
    login_rate_limit: u32,
}

impl RateLimitState {
    /// Create a new rate limit state.
    pub fn new(login_rate_limit: u32) -> Self {
        Self {
            login_limiters: RwLock::new(HashMap::new()),
            login_rate_limit,
        }
    }

    /// Login attempts allowed per minute.
    pub fn login_rate_limit(&self) -> u32 {
        self.login_rate_limit
    }

    fn limiter_for(&self, ip: &str) -> Arc<IpRateLimiter> {
        {
            let read_guard = self.login_limiters.read().unwrap_or_else(|e| e.into_inner());
            if let Some(limiter) = read_guard.get(ip) {
                return limiter.clone();
            }
        }

        let mut write_guard = self
            .login_limiters
            .write()
            .unwrap_or_else(|e| e.into_inner());

        // Another request may have inserted it while we waited
        if let Some(limiter) = write_guard.get(ip) {
            return limiter.clone();
        }

        let quota =
            Quota::per_minute(NonZeroU32::new(self.login_rate_limit).unwrap_or(NonZeroU32::MIN));
        let limiter = Arc::new(RateLimiter::direct(quota));
        write_guard.insert(ip.to_string(), limiter.clone());
        limiter
    }

    /// Check whether a login attempt from `ip` is allowed, consuming one token.
    pub fn check_login(&self, ip: &str) -> bool {
        self.limiter_for(ip).check().is_ok()
    }

    /// Drop limiters that are back at full capacity.
    pub fn cleanup(&self) {
        let mut guard = self
            .login_limiters
            .write()
            .unwrap_or_else(|e| e.into_inner());
        let before = guard.len();
        let burst = self.full_burst();
        // A successful full-burst check means the limiter has fully recovered
        guard.retain(|_, limiter| {
            Arc::strong_count(limiter) > 1 || !matches!(limiter.check_n(burst), Ok(Ok(())))
        });
        tracing::debug!(removed = before - guard.len(), "Login rate limiters cleaned up");
    }

    fn full_burst(&self) -> NonZeroU32 {
        NonZeroU32::new(self.login_rate_limit).unwrap_or(NonZeroU32::MIN)
    }

    /// Number of tracked client addresses.
    pub fn tracked(&self) -> usize {
        self.login_limiters
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Start a background task to periodically clean up old entries.
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(300)).await;
                self.cleanup();
            }
        });
    }
}

/// Client IP from the connection, or `"unknown"` when the server was not
/// started with connect info.
pub fn client_ip(connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Rate limiting middleware for login submissions.
///
/// Only `POST` requests consume tokens; showing the form is free.
pub async fn login_rate_limit(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    req: Request,
    next: Next,
) -> Response {
    if req.method() != Method::POST {
        return next.run(req).await;
    }

    let ip = client_ip(connect_info);
    if !state.rate_limit.check_login(&ip) {
        tracing::warn!(ip = %ip, "Login rate limit exceeded");
        return WebError::too_many_requests(state.text.too_many_attempts).into_response();
    }

    next.run(req).await
}
