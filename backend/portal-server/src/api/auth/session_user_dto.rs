use portal_core::{Role, UserRecord};

use serde::Serialize;

/// The identity fields a session exposes to the browser
#[derive(Debug, Clone, Serialize)]
pub struct SessionUserDto {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl From<&UserRecord> for SessionUserDto {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}
