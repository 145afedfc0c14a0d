use crate::error::{require, require_url};
use crate::{ConfigErrorResult, DEFAULT_CATALOG_ROOT_FOLDER, DEFAULT_CATALOG_WORKSPACE_ID};

use serde::Deserialize;

/// Agent Catalog Service connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    /// Name of the folder whose subfolders become categories
    pub root_folder: String,
    pub workspace_id: String,
    /// Skip TLS verification (self-signed deployments)
    pub accept_invalid_certs: bool,
    /// Background sync period; 0 disables the scheduled sync
    pub sync_interval_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            root_folder: String::from(DEFAULT_CATALOG_ROOT_FOLDER),
            workspace_id: String::from(DEFAULT_CATALOG_WORKSPACE_ID),
            accept_invalid_certs: false,
            sync_interval_secs: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Base URL without a trailing slash
    pub base_url: String,
    pub api_key: String,
    pub root_folder: String,
    pub workspace_id: String,
    pub accept_invalid_certs: bool,
}

impl CatalogConfig {
    pub fn resolve(&self) -> ConfigErrorResult<CatalogSettings> {
        let base_url = require_url(
            self.base_url.as_deref(),
            "catalog.base_url",
            "PORTAL_CATALOG_BASE_URL",
        )?;

        Ok(CatalogSettings {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: require(self.api_key.as_deref(), "catalog.api_key", "PORTAL_CATALOG_API_KEY")?,
            root_folder: require(
                Some(&self.root_folder),
                "catalog.root_folder",
                "PORTAL_CATALOG_ROOT_FOLDER",
            )?,
            workspace_id: require(
                Some(&self.workspace_id),
                "catalog.workspace_id",
                "PORTAL_CATALOG_WORKSPACE_ID",
            )?,
            accept_invalid_certs: self.accept_invalid_certs,
        })
    }
}
