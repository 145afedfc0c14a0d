use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("{category} error: {message} {location}")]
    Generic {
        category: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Missing required setting {key} (set {env_var}) {location}")]
    Missing {
        key: &'static str,
        env_var: &'static str,
        location: ErrorLocation,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Create a config error
    #[track_caller]
    pub fn config<S: Into<String>>(message: S) -> Self {
        ConfigError::Generic {
            category: "Config",
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a session error
    #[track_caller]
    pub fn session<S: Into<String>>(message: S) -> Self {
        ConfigError::Generic {
            category: "Session",
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a storage error
    #[track_caller]
    pub fn storage<S: Into<String>>(message: S) -> Self {
        ConfigError::Generic {
            category: "Storage",
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a server error
    #[track_caller]
    pub fn server<S: Into<String>>(message: S) -> Self {
        ConfigError::Generic {
            category: "Server",
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create an integration error (OIDC, ticket SSO, catalog, frontend)
    #[track_caller]
    pub fn integration<S: Into<String>>(message: S) -> Self {
        ConfigError::Generic {
            category: "Integration",
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// A required value is absent from both config.toml and the environment
    #[track_caller]
    pub fn missing(key: &'static str, env_var: &'static str) -> Self {
        ConfigError::Missing {
            key,
            env_var,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;

/// Resolve an optional setting, treating blank strings as absent.
#[track_caller]
pub(crate) fn require(
    value: Option<&str>,
    key: &'static str,
    env_var: &'static str,
) -> ConfigErrorResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::missing(key, env_var)),
    }
}

/// Resolve a required setting that must also parse as an absolute http(s) URL.
#[track_caller]
pub(crate) fn require_url(
    value: Option<&str>,
    key: &'static str,
    env_var: &'static str,
) -> ConfigErrorResult<String> {
    let raw = require(value, key, env_var)?;
    match url::Url::parse(&raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(raw),
        _ => Err(ConfigError::integration(format!(
            "{key} must be an absolute http(s) URL, got '{raw}'"
        ))),
    }
}
