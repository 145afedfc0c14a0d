use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CATALOG_FILE, DEFAULT_CREDENTIALS_FILE,
    DEFAULT_USERS_FILE,
};

use std::path::Path;

use serde::Deserialize;

/// Locations of the JSON tables, relative to the config directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub users_file: String,
    pub credentials_file: String,
    pub catalog_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            users_file: String::from(DEFAULT_USERS_FILE),
            credentials_file: String::from(DEFAULT_CREDENTIALS_FILE),
            catalog_file: String::from(DEFAULT_CATALOG_FILE),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (key, value) in [
            ("storage.users_file", &self.users_file),
            ("storage.credentials_file", &self.credentials_file),
            ("storage.catalog_file", &self.catalog_file),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::storage(format!("{key} cannot be empty")));
            }
            if Path::new(value).is_absolute() || value.contains("..") {
                return Err(ConfigError::storage(format!(
                    "{key} must be relative and cannot contain '..'"
                )));
            }
        }

        let mut names = [&self.users_file, &self.credentials_file, &self.catalog_file];
        names.sort();
        if names.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(ConfigError::storage("storage files must be distinct"));
        }

        Ok(())
    }
}
