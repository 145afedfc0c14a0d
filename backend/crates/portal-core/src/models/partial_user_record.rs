//! Identity claims handed to the user store's upsert.

use crate::{Origin, Role};

use std::collections::BTreeMap;

use serde_json::Value;

/// A user record with every field optional.
///
/// `None` means "not supplied": the merge keeps whatever the stored record
/// already holds. Identity bridges leave `role` and `allowed_apps` unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialUserRecord {
    pub id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub allowed_apps: Option<Vec<String>>,
    pub origin: Option<Origin>,
    pub extensions: BTreeMap<String, Value>,
}

impl PartialUserRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_allowed_apps(mut self, apps: Vec<String>) -> Self {
        self.allowed_apps = Some(apps);
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Attach a raw upstream payload under `key`, replacing any earlier value.
    pub fn with_extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }
}
