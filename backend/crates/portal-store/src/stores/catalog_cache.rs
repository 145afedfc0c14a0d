use crate::Result as StoreErrorResult;
use crate::stores::json_file;

use portal_core::Category;

use std::path::{Path, PathBuf};

/// The synchronized catalog, persisted as one nested JSON document.
pub struct CatalogCache {
    path: PathBuf,
}

impl CatalogCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached categories; empty before the first sync.
    pub async fn load(&self) -> StoreErrorResult<Vec<Category>> {
        Ok(json_file::read(&self.path).await?.unwrap_or_default())
    }

    /// Replace the whole cache. Nothing from the previous content survives.
    pub async fn replace(&self, categories: &[Category]) -> StoreErrorResult<()> {
        json_file::write(&self.path, categories).await
    }
}
