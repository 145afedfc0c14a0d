use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

const BEARER_PREFIX: &str = "Bearer ";

/// Token from an `Authorization: Bearer <token>` header value.
#[track_caller]
pub fn bearer_token(header: Option<&str>) -> AuthErrorResult<&str> {
    let Some(header) = header else {
        return Err(AuthError::MissingHeader {
            location: ErrorLocation::from(Location::caller()),
        });
    };

    match header.strip_prefix(BEARER_PREFIX).map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        Some(_) => Err(AuthError::InvalidToken {
            message: "empty bearer token".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }),
        None => Err(AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
