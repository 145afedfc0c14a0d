use crate::stores::json_file;
use crate::{Result as StoreErrorResult, StoreError};

use portal_core::LocalCredential;

use std::path::{Path, PathBuf};

/// Username/password-hash table used by local login.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All credentials; empty when the file does not exist yet.
    pub async fn get_all(&self) -> StoreErrorResult<Vec<LocalCredential>> {
        Ok(json_file::read(&self.path).await?.unwrap_or_default())
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> StoreErrorResult<Option<LocalCredential>> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .find(|c| c.username == username))
    }

    pub async fn find_by_id(&self, id: &str) -> StoreErrorResult<Option<LocalCredential>> {
        Ok(self.get_all().await?.into_iter().find(|c| c.id == id))
    }

    pub async fn save_all(&self, credentials: &[LocalCredential]) -> StoreErrorResult<()> {
        json_file::write(&self.path, credentials).await
    }

    /// Add a credential. Usernames are unique within this table.
    pub async fn insert(&self, credential: LocalCredential) -> StoreErrorResult<LocalCredential> {
        let mut credentials = self.get_all().await?;

        if credentials
            .iter()
            .any(|c| c.username == credential.username)
        {
            return Err(StoreError::conflict(format!(
                "local credential for '{}' already exists",
                credential.username
            )));
        }

        credentials.push(credential.clone());
        self.save_all(&credentials).await?;
        Ok(credential)
    }

    /// Replace the stored hash for `id`. Returns false when the id is unknown.
    pub async fn set_password_hash(&self, id: &str, hash: String) -> StoreErrorResult<bool> {
        let mut credentials = self.get_all().await?;

        let Some(credential) = credentials.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        credential.password = hash;

        self.save_all(&credentials).await?;
        Ok(true)
    }
}
