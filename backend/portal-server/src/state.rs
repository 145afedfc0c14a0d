use crate::ApiResult;
use crate::error::{Result as ServerErrorResult, ServerError};

use portal_auth::{LoginRateLimiter, OidcBridge, SessionIssuer, TicketBridge};
use portal_config::{Config, ConfigSource, LoginRateLimitConfig};
use portal_store::{CatalogCache, CredentialStore, UserStore};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared state for every handler.
///
/// Settings are looked up through [`ConfigSource`] per request; only the
/// data directory and the long-lived caches (discovery, login throttle) are
/// fixed at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: ConfigSource,
    /// Directory the storage file names are relative to
    pub data_dir: PathBuf,
    pub oidc: Arc<OidcBridge>,
    pub ticket: Arc<TicketBridge>,
    pub login_limiter: Arc<LoginRateLimiter>,
}

impl AppState {
    pub fn new(
        config: ConfigSource,
        data_dir: PathBuf,
        login_rate_limit: LoginRateLimitConfig,
    ) -> ServerErrorResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(OUTBOUND_TIMEOUT)
            .build()
            .map_err(ServerError::HttpClient)?;

        Ok(Self {
            config,
            data_dir,
            oidc: Arc::new(OidcBridge::new(http.clone())),
            ticket: Arc::new(TicketBridge::new(http)),
            login_limiter: Arc::new(LoginRateLimiter::new(login_rate_limit)),
        })
    }

    /// Configuration as of this call.
    pub fn config(&self) -> ApiResult<Arc<Config>> {
        Ok(self.config.current()?)
    }

    pub fn users(&self, config: &Config) -> UserStore {
        UserStore::new(self.data_dir.join(&config.storage.users_file))
    }

    pub fn credentials(&self, config: &Config) -> CredentialStore {
        CredentialStore::new(self.data_dir.join(&config.storage.credentials_file))
    }

    pub fn catalog_cache(&self, config: &Config) -> CatalogCache {
        CatalogCache::new(self.data_dir.join(&config.storage.catalog_file))
    }

    pub fn session_issuer(&self, config: &Config) -> ApiResult<SessionIssuer> {
        Ok(SessionIssuer::from_config(&config.session)?)
    }
}
