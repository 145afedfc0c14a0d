use crate::{AuthError, Result as AuthErrorResult};

use portal_core::Role;

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Session token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User record id
    pub id: String,
    pub username: String,
    pub role: Role,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
}

impl Claims {
    /// Validate claims after signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.id.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "id".to_string(),
                message: "id cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.iat > self.exp {
            return Err(AuthError::InvalidClaim {
                claim: "iat".to_string(),
                message: "issued after expiry".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
