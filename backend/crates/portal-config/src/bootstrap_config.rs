use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

/// Initial local admin account, created once at startup when absent.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct BootstrapConfig {
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl BootstrapConfig {
    /// `(username, password)` when both are configured.
    pub fn admin(&self) -> Option<(&str, &str)> {
        match (&self.admin_username, &self.admin_password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.admin_username.is_some() != self.admin_password.is_some() {
            return Err(ConfigError::config(
                "bootstrap.admin_username and bootstrap.admin_password must be set together",
            ));
        }
        Ok(())
    }
}
