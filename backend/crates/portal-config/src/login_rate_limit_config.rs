use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_LOGIN_ATTEMPTS: u32 = 1;
pub const MAX_LOGIN_ATTEMPTS: u32 = 1000;
pub const DEFAULT_LOGIN_ATTEMPTS: u32 = 5;

pub const MIN_LOGIN_WINDOW_SECS: u64 = 1;
pub const MAX_LOGIN_WINDOW_SECS: u64 = 3600;
pub const DEFAULT_LOGIN_WINDOW_SECS: u64 = 60;

/// Local-login throttling, applied per username.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoginRateLimitConfig {
    /// Attempts allowed per window
    pub max_attempts: u32,
    /// Window duration in seconds
    pub window_secs: u64,
}

impl Default for LoginRateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_LOGIN_ATTEMPTS,
            window_secs: DEFAULT_LOGIN_WINDOW_SECS,
        }
    }
}

impl LoginRateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_attempts < MIN_LOGIN_ATTEMPTS || self.max_attempts > MAX_LOGIN_ATTEMPTS {
            return Err(ConfigError::config(format!(
                "login_rate_limit.max_attempts must be {}-{}, got {}",
                MIN_LOGIN_ATTEMPTS, MAX_LOGIN_ATTEMPTS, self.max_attempts
            )));
        }

        if self.window_secs < MIN_LOGIN_WINDOW_SECS || self.window_secs > MAX_LOGIN_WINDOW_SECS {
            return Err(ConfigError::config(format!(
                "login_rate_limit.window_secs must be {}-{}, got {}",
                MIN_LOGIN_WINDOW_SECS, MAX_LOGIN_WINDOW_SECS, self.window_secs
            )));
        }

        Ok(())
    }
}
