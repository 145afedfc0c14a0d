use crate::Role;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Username/password-hash pair for a locally authenticated account.
///
/// Kept in its own table; never merged into a `UserRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalCredential {
    pub id: String,
    pub username: String,
    /// PHC-formatted password hash
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl LocalCredential {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            password: password_hash.into(),
            role,
        }
    }
}
