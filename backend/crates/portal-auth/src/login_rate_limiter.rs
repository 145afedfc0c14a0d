use crate::{AuthError, Result as AuthErrorResult};

use portal_config::LoginRateLimitConfig;

use std::num::NonZeroU32;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

/// Per-username throttle for local login attempts
pub struct LoginRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    config: LoginRateLimitConfig,
}

impl LoginRateLimiter {
    pub fn new(config: LoginRateLimitConfig) -> Self {
        let burst = NonZeroU32::new(config.max_attempts).unwrap_or(NonZeroU32::MIN);
        let period = Duration::from_secs(config.window_secs.max(1)) / burst.get();
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
            config,
        }
    }

    /// Record an attempt for `username`, failing once the window is exhausted.
    #[track_caller]
    pub fn check(&self, username: &str) -> AuthErrorResult<()> {
        self.limiter
            .check_key(&username.trim().to_lowercase())
            .map_err(|_| AuthError::RateLimitExceeded {
                limit: self.config.max_attempts,
                window_secs: self.config.window_secs,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Drop state for keys whose quota has fully replenished.
    pub fn prune(&self) {
        self.limiter.retain_recent();
    }
}
