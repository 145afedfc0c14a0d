use portal_config::ConfigError;
use portal_store::StoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog Service request to {url} failed: {source} {location}")]
    Http {
        url: String,
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Catalog Service error: {message} {location}")]
    Upstream {
        message: String,
        location: ErrorLocation,
    },

    #[error("Root folder \"{name}\" not found. Available folders: {available} {location}")]
    RootFolderNotFound {
        name: String,
        /// Pretty-printed folder tree as returned by the service
        available: String,
        location: ErrorLocation,
    },

    #[error("Catalog Service returned an empty user roster {location}")]
    EmptyRoster { location: ErrorLocation },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CatalogError {
    #[track_caller]
    pub(crate) fn http(url: &str, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.to_string(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Http { .. } => "CATALOG_UNREACHABLE",
            Self::Upstream { .. } => "CATALOG_ERROR",
            Self::RootFolderNotFound { .. } => "ROOT_FOLDER_NOT_FOUND",
            Self::EmptyRoster { .. } => "EMPTY_ROSTER",
            Self::Store(_) => "STORE_ERROR",
            Self::Config(_) => "CONFIGURATION_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
