use crate::Result as StoreErrorResult;
use crate::stores::json_file;

use portal_core::{PartialUserRecord, PermissionUpdate, UserRecord};

use std::path::{Path, PathBuf};

use log::{debug, info};

/// Whether an upsert matched an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Flat JSON table of [`UserRecord`]s.
///
/// The only writer of the users file.
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records. A missing file is initialized to an empty table.
    pub async fn get_all(&self) -> StoreErrorResult<Vec<UserRecord>> {
        match json_file::read(&self.path).await? {
            Some(users) => Ok(users),
            None => {
                debug!("Initializing empty user table at {}", self.path.display());
                json_file::write(&self.path, &Vec::<UserRecord>::new()).await?;
                Ok(Vec::new())
            }
        }
    }

    pub async fn find_by_id(&self, id: &str) -> StoreErrorResult<Option<UserRecord>> {
        Ok(self.get_all().await?.into_iter().find(|u| u.id == id))
    }

    pub async fn find_by_username(&self, username: &str) -> StoreErrorResult<Option<UserRecord>> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .find(|u| u.username == username))
    }

    /// Overwrite the whole table.
    pub async fn save_all(&self, users: &[UserRecord]) -> StoreErrorResult<()> {
        json_file::write(&self.path, users).await
    }

    /// Merge `partial` into the matching record (by id, then username) or create one.
    pub async fn upsert(&self, partial: PartialUserRecord) -> StoreErrorResult<UserRecord> {
        self.upsert_detailed(partial).await.map(|(user, _)| user)
    }

    pub async fn upsert_detailed(
        &self,
        partial: PartialUserRecord,
    ) -> StoreErrorResult<(UserRecord, UpsertOutcome)> {
        let mut users = self.get_all().await?;

        let by_id = partial
            .id
            .as_deref()
            .and_then(|id| users.iter().position(|u| u.id == id));
        let matched = by_id.or_else(|| {
            partial
                .username
                .as_deref()
                .and_then(|name| users.iter().position(|u| u.username == name))
        });

        let (user, outcome) = match matched {
            Some(index) => {
                let existing = users.remove(index);
                let merged = existing.merge(partial);
                users.insert(index, merged.clone());
                (merged, UpsertOutcome::Updated)
            }
            None => {
                let created = UserRecord::from_partial(partial)?;
                info!(
                    "Creating user {} ({}, origin {})",
                    created.username, created.id, created.origin
                );
                users.push(created.clone());
                (created, UpsertOutcome::Created)
            }
        };

        self.save_all(&users).await?;
        Ok((user, outcome))
    }

    /// Apply an admin permission change. `None` (and no write) when the id is unknown.
    pub async fn update_permissions(
        &self,
        id: &str,
        update: PermissionUpdate,
    ) -> StoreErrorResult<Option<UserRecord>> {
        let mut users = self.get_all().await?;

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        let mut partial = PartialUserRecord::new();
        partial.role = update.role;
        partial.allowed_apps = update.allowed_apps;
        *user = user.clone().merge(partial);
        let updated = user.clone();

        self.save_all(&users).await?;
        info!(
            "Updated permissions for {}: role={}, apps={}",
            updated.id,
            updated.role,
            updated.allowed_apps.len()
        );
        Ok(Some(updated))
    }

    /// Delete every record matching `predicate`, returning the removed records.
    ///
    /// The table is only rewritten when something was removed.
    pub async fn remove_where<F>(&self, predicate: F) -> StoreErrorResult<Vec<UserRecord>>
    where
        F: Fn(&UserRecord) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) =
            self.get_all().await?.into_iter().partition(|u| predicate(u));

        if !removed.is_empty() {
            self.save_all(&kept).await?;
        }

        Ok(removed)
    }
}
