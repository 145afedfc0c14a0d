use crate::{AuthError, Claims, Result as AuthErrorResult};

use portal_config::SessionConfig;
use portal_core::{ErrorLocation, UserRecord};

use std::panic::Location;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use log::debug;

/// Session lifetime
pub const SESSION_TTL_HOURS: i64 = 24;

/// Mints and verifies HS256 session tokens carrying `{id, username, role}`.
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionIssuer {
    pub fn with_hs256(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 30; // 30 second clock skew tolerance

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::hours(SESSION_TTL_HOURS),
        }
    }

    /// Build from the configured secret, failing when it is absent or too short.
    pub fn from_config(session: &SessionConfig) -> AuthErrorResult<Self> {
        let secret = session.resolve()?;
        Ok(Self::with_hs256(secret.as_bytes()))
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    #[track_caller]
    pub fn issue(&self, user: &UserRecord) -> AuthErrorResult<String> {
        let now = Utc::now();
        let claims = Claims {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::JwtEncode {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Validate a token and return its claims, with the failure reason.
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }

    /// Claims for a valid token, `None` for anything else.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match self.validate(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!("Rejected session token: {}", e.error_code());
                None
            }
        }
    }
}
