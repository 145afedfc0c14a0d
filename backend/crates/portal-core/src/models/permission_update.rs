use crate::Role;

/// Admin-issued change to a user's authorization state.
///
/// Only the supplied fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionUpdate {
    pub role: Option<Role>,
    pub allowed_apps: Option<Vec<String>>,
}

impl PermissionUpdate {
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            allowed_apps: None,
        }
    }

    pub fn allowed_apps(apps: Vec<String>) -> Self {
        Self {
            role: None,
            allowed_apps: Some(apps),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.allowed_apps.is_none()
    }
}
