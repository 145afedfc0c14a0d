mod bootstrap_config;
mod catalog_config;
mod config;
mod config_source;
mod error;
mod frontend_config;
mod log_level;
mod logging_config;
mod login_rate_limit_config;
mod oidc_config;
mod server_config;
mod session_config;
mod storage_config;
mod ticket_config;

pub use bootstrap_config::BootstrapConfig;
pub use catalog_config::{CatalogConfig, CatalogSettings};
pub use config::Config;
pub use config_source::ConfigSource;
pub use error::{ConfigError, ConfigErrorResult};
pub use frontend_config::FrontendConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use login_rate_limit_config::LoginRateLimitConfig;
pub use oidc_config::{OidcConfig, OidcSettings};
pub use server_config::ServerConfig;
pub use session_config::SessionConfig;
pub use storage_config::StorageConfig;
pub use ticket_config::{TicketConfig, TicketSettings};

pub const CONFIG_DIR_ENV: &str = "PORTAL_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".portal";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3001;
const MIN_PORT: u16 = 1024;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

const DEFAULT_USERS_FILE: &str = "users.json";
const DEFAULT_CREDENTIALS_FILE: &str = "local-users.json";
const DEFAULT_CATALOG_FILE: &str = "catalog.json";

pub const MIN_SESSION_SECRET_LENGTH: usize = 32;

const DEFAULT_CATALOG_ROOT_FOLDER: &str = "Portal";
const DEFAULT_CATALOG_WORKSPACE_ID: &str = "default";

#[cfg(test)]
mod tests;
