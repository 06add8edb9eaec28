//! Per-admin request throttling.

use std::num::NonZeroU32;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::{Clock, DefaultClock},
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::auth::AdminAuth;

type KeyedLimiter = RateLimiter<Uuid, DefaultKeyedStateStore<Uuid>, DefaultClock>;

/// One quota bucket per admin id, shared across all throttled routes.
pub struct RateLimiterState {
    limiter: KeyedLimiter,
}

impl RateLimiterState {
    /// A zero limit disables the layer in the app wiring before this is
    /// ever constructed; it degrades to one request per minute here.
    pub fn new(per_minute: u32) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(per_minute).unwrap_or(NonZeroU32::MIN));
        Self {
            limiter: RateLimiter::keyed(quota),
        }
    }

    /// Ok when the admin still has quota, otherwise the number of seconds
    /// until the next permit frees up.
    pub fn check(&self, admin_id: Uuid) -> Result<(), u64> {
        self.limiter.check_key(&admin_id).map_err(|not_until| {
            let wait = not_until.wait_time_from(DefaultClock::default().now());
            wait.as_secs().max(1)
        })
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("tracked_admins", &self.limiter.len())
            .finish()
    }
}

/// Throttles write routes per authenticated admin.
///
/// Mounted inside `require_admin`, so the admin identity is already in the
/// request extensions. Requests that somehow lack it pass through and get
/// rejected by the auth layer instead.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(limiter) = state.rate_limiter.as_ref() else {
        return next.run(req).await;
    };

    let admin_id = match req.extensions().get::<AdminAuth>() {
        Some(auth) => auth.user_id,
        None => return next.run(req).await,
    };

    match limiter.check(admin_id) {
        Ok(()) => next.run(req).await,
        Err(retry_after_secs) => ApiError::RateLimited { retry_after_secs }.into_response(),
    }
}
