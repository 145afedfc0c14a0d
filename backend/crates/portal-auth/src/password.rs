//! Argon2id password hashing for local credentials.

use crate::{AuthError, Result as AuthErrorResult};

use portal_core::ErrorLocation;

use std::panic::Location;

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
#[cfg(test)]
use argon2::{Algorithm, Params, Version};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Strong defaults in production, cheap parameters under test.
fn argon2_instance() -> Argon2<'static> {
    #[cfg(test)]
    {
        match Params::new(1024, 1, 1, None) {
            Ok(params) => Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            Err(_) => Argon2::default(),
        }
    }

    #[cfg(not(test))]
    {
        Argon2::default()
    }
}

#[track_caller]
pub fn check_policy(password: &str) -> AuthErrorResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword {
            min_length: MIN_PASSWORD_LENGTH,
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}

/// Hash into a PHC string (`$argon2id$...`).
#[track_caller]
pub fn hash_password(password: &str) -> AuthErrorResult<String> {
    let salt_bytes: [u8; 16] = rand::random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::PasswordHash {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    argon2_instance()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// False for a mismatch or an unparseable stored hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    argon2_instance()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
