//! User record entity and the upsert merge rules.

use crate::models::dedupe_apps;
use crate::{CoreError, Origin, PartialUserRecord, Result as CoreErrorResult, Role};

use std::collections::BTreeMap;
use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A portal identity with its authorization state.
///
/// `role` and `allowed_apps` are only changed when a caller explicitly
/// supplies them; identity refreshes from login bridges or roster syncs
/// never touch them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Namespaced by origin; immutable once created
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub allowed_apps: Vec<String>,
    #[serde(default)]
    pub origin: Origin,
    /// Opaque origin-specific payloads (`oidc_data`, `ticket_data`, `catalog_data`)
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl UserRecord {
    /// Build a brand-new record from an unmatched partial.
    ///
    /// Missing `role` defaults to `user`, missing `allowed_apps` to empty, and
    /// a missing `id` is generated.
    #[track_caller]
    pub fn from_partial(partial: PartialUserRecord) -> CoreErrorResult<Self> {
        let Some(username) = partial.username.filter(|u| !u.is_empty()) else {
            return Err(CoreError::Validation {
                message: "username is required to create a user".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        Ok(Self {
            id: partial.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            username,
            email: partial.email.unwrap_or_default(),
            role: partial.role.unwrap_or_default(),
            allowed_apps: dedupe_apps(partial.allowed_apps.unwrap_or_default()),
            origin: partial.origin.unwrap_or_default(),
            extensions: partial.extensions,
        })
    }

    /// Merge a partial into this (matched) record.
    ///
    /// Supplied identity fields and extension keys overwrite. `id` and
    /// `origin` always stay as stored. `role` and `allowed_apps` are
    /// `partial ?? existing`.
    pub fn merge(self, partial: PartialUserRecord) -> Self {
        let mut extensions = self.extensions;
        extensions.extend(partial.extensions);

        Self {
            id: self.id,
            username: partial.username.unwrap_or(self.username),
            email: partial.email.unwrap_or(self.email),
            role: partial.role.unwrap_or(self.role),
            allowed_apps: partial
                .allowed_apps
                .map(dedupe_apps)
                .unwrap_or(self.allowed_apps),
            origin: self.origin,
            extensions,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins reach every app; everyone else only their allow-list.
    pub fn can_access_app(&self, app_id: &str) -> bool {
        self.is_admin() || self.allowed_apps.iter().any(|app| app == app_id)
    }

    /// Raw upstream payload stored for `origin`, if any.
    pub fn origin_payload(&self, origin: Origin) -> Option<&Value> {
        origin
            .extension_key()
            .and_then(|key| self.extensions.get(key))
    }
}
