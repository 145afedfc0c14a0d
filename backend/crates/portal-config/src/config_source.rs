use crate::{Config, ConfigErrorResult};

use std::sync::Arc;

/// Where request handlers get their configuration from.
///
/// `Environment` re-reads `config.toml` and `PORTAL_*` on every call, so
/// integration endpoints and secrets are picked up at call time rather than
/// frozen at startup.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    Environment,
    Fixed(Arc<Config>),
}

impl ConfigSource {
    pub fn fixed(config: Config) -> Self {
        Self::Fixed(Arc::new(config))
    }

    pub fn current(&self) -> ConfigErrorResult<Arc<Config>> {
        match self {
            Self::Environment => Config::load().map(Arc::new),
            Self::Fixed(config) => Ok(Arc::clone(config)),
        }
    }
}
