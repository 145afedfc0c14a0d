use crate::error::require;
use crate::{ConfigError, ConfigErrorResult, MIN_SESSION_SECRET_LENGTH};

use serde::Deserialize;

/// Signing key for session tokens. There is no fallback secret.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    pub secret: Option<String>,
}

impl SessionConfig {
    pub fn resolve(&self) -> ConfigErrorResult<String> {
        let secret = require(self.secret.as_deref(), "session.secret", "PORTAL_SESSION_SECRET")?;

        if secret.len() < MIN_SESSION_SECRET_LENGTH {
            return Err(ConfigError::session(format!(
                "session.secret must be at least {} characters",
                MIN_SESSION_SECRET_LENGTH
            )));
        }

        Ok(secret)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.resolve().map(|_| ())
    }
}
