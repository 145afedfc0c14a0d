use crate::{
    BootstrapConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, CatalogConfig, ConfigError,
    ConfigErrorResult, DEFAULT_CONFIG_DIR_NAME, FrontendConfig, LoggingConfig,
    LoginRateLimitConfig, OidcConfig, ServerConfig, SessionConfig, StorageConfig, TicketConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub session: SessionConfig,
    pub oidc: OidcConfig,
    pub ticket: TicketConfig,
    pub catalog: CatalogConfig,
    pub frontend: FrontendConfig,
    pub login_rate_limit: LoginRateLimitConfig,
    pub bootstrap: BootstrapConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for PORTAL_CONFIG_DIR env var, else use ./.portal/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply PORTAL_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse a config from TOML text without touching the environment.
    pub fn from_toml_str(contents: &str) -> ConfigErrorResult<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Toml {
            path: PathBuf::from(CONFIG_FILE_NAME),
            source: e,
        })
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: PORTAL_CONFIG_DIR env var > ./.portal/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate startup configuration.
    ///
    /// Integration sections (oidc, ticket, catalog, frontend) are resolved
    /// when first used instead.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.storage.validate()?;
        self.session.validate()?;
        self.login_rate_limit.validate()?;
        self.bootstrap.validate()?;
        Ok(())
    }

    pub fn users_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.storage.users_file))
    }

    pub fn credentials_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.storage.credentials_file))
    }

    pub fn catalog_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.storage.catalog_file))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  storage: users={}, credentials={}, catalog={}",
            self.storage.users_file, self.storage.credentials_file, self.storage.catalog_file
        );
        info!(
            "  session: secret {}",
            if self.session.secret.is_some() {
                "set"
            } else {
                "MISSING"
            }
        );
        info!(
            "  oidc: {}",
            if self.oidc.is_configured() {
                "configured"
            } else {
                "not configured"
            }
        );
        info!(
            "  ticket: {}",
            if self.ticket.is_configured() {
                "configured"
            } else {
                "not configured"
            }
        );
        info!(
            "  catalog: base_url={}, root_folder={}, workspace={}, api_key={}, sync every {}s",
            self.catalog.base_url.as_deref().unwrap_or("<unset>"),
            self.catalog.root_folder,
            self.catalog.workspace_id,
            if self.catalog.api_key.is_some() {
                "set"
            } else {
                "unset"
            },
            self.catalog.sync_interval_secs
        );
        info!(
            "  login_rate_limit: {}/{}s",
            self.login_rate_limit.max_attempts, self.login_rate_limit.window_secs
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("PORTAL_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("PORTAL_SERVER_PORT", &mut self.server.port);

        // Logging
        Self::apply_env_parse("PORTAL_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("PORTAL_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("PORTAL_LOG_FILE", &mut self.logging.file);

        // Storage
        Self::apply_env_string("PORTAL_USERS_FILE", &mut self.storage.users_file);
        Self::apply_env_string(
            "PORTAL_CREDENTIALS_FILE",
            &mut self.storage.credentials_file,
        );
        Self::apply_env_string("PORTAL_CATALOG_FILE", &mut self.storage.catalog_file);

        // Session
        Self::apply_env_option_string("PORTAL_SESSION_SECRET", &mut self.session.secret);

        // OIDC
        Self::apply_env_option_string("PORTAL_OIDC_ISSUER", &mut self.oidc.issuer);
        Self::apply_env_option_string("PORTAL_OIDC_CLIENT_ID", &mut self.oidc.client_id);
        Self::apply_env_option_string(
            "PORTAL_OIDC_CLIENT_SECRET",
            &mut self.oidc.client_secret,
        );
        Self::apply_env_option_string("PORTAL_OIDC_REDIRECT_URI", &mut self.oidc.redirect_uri);

        // Ticket SSO
        Self::apply_env_option_string("PORTAL_TICKET_SERVER_URL", &mut self.ticket.server_url);
        Self::apply_env_option_string(
            "PORTAL_TICKET_SERVICE_URL",
            &mut self.ticket.service_url,
        );

        // Catalog
        Self::apply_env_option_string("PORTAL_CATALOG_BASE_URL", &mut self.catalog.base_url);
        Self::apply_env_option_string("PORTAL_CATALOG_API_KEY", &mut self.catalog.api_key);
        Self::apply_env_string(
            "PORTAL_CATALOG_ROOT_FOLDER",
            &mut self.catalog.root_folder,
        );
        Self::apply_env_string(
            "PORTAL_CATALOG_WORKSPACE_ID",
            &mut self.catalog.workspace_id,
        );
        Self::apply_env_bool(
            "PORTAL_CATALOG_ACCEPT_INVALID_CERTS",
            &mut self.catalog.accept_invalid_certs,
        );
        Self::apply_env_parse(
            "PORTAL_CATALOG_SYNC_INTERVAL_SECS",
            &mut self.catalog.sync_interval_secs,
        );

        // Frontend
        Self::apply_env_option_string("PORTAL_FRONTEND_URL", &mut self.frontend.base_url);

        // Login rate limit
        Self::apply_env_parse(
            "PORTAL_LOGIN_MAX_ATTEMPTS",
            &mut self.login_rate_limit.max_attempts,
        );
        Self::apply_env_parse(
            "PORTAL_LOGIN_WINDOW_SECS",
            &mut self.login_rate_limit.window_secs,
        );

        // Bootstrap admin
        Self::apply_env_option_string(
            "PORTAL_BOOTSTRAP_ADMIN_USERNAME",
            &mut self.bootstrap.admin_username,
        );
        Self::apply_env_option_string(
            "PORTAL_BOOTSTRAP_ADMIN_PASSWORD",
            &mut self.bootstrap.admin_password,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
