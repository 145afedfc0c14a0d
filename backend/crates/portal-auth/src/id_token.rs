//! ID token payload extraction and claim checks.
//!
//! The token is received directly from the provider's token endpoint over
//! the client-authenticated back channel, so only the payload claims are
//! checked here (`iss`, `aud`, `exp`).

use crate::{AuthError, Result as AuthErrorResult};

use portal_core::{ErrorLocation, Origin, PartialUserRecord};

use std::panic::Location;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

/// Clock skew tolerated on `exp`
const EXP_LEEWAY_SECS: i64 = 30;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    fn contains(&self, client_id: &str) -> bool {
        match self {
            Self::One(aud) => aud == client_id,
            Self::Many(auds) => auds.iter().any(|aud| aud == client_id),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RequiredClaims {
    sub: String,
    iss: String,
    aud: Audience,
    exp: i64,
}

/// Verified identity claims from an ID token.
#[derive(Debug, Clone)]
pub struct IdTokenClaims {
    pub sub: String,
    pub name: Option<String>,
    pub preferred_username: Option<String>,
    pub email: Option<String>,
    /// Full payload, stored as the record's `oidc_data`
    pub raw: Value,
}

impl IdTokenClaims {
    /// Decode `id_token` and check it was issued by `issuer` for `client_id`.
    #[track_caller]
    pub fn from_id_token(id_token: &str, issuer: &str, client_id: &str) -> AuthErrorResult<Self> {
        let raw = decode_payload(id_token)?;

        let Some(object) = raw.as_object().filter(|o| !o.is_empty()) else {
            return Err(AuthError::MissingClaims {
                message: "ID token carries no claims".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let required: RequiredClaims =
            serde_json::from_value(raw.clone()).map_err(|e| AuthError::MissingClaims {
                message: format!("ID token is missing required claims: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if required.iss.trim_end_matches('/') != issuer.trim_end_matches('/') {
            return Err(invalid_claim("iss", "issuer does not match the provider"));
        }
        if !required.aud.contains(client_id) {
            return Err(invalid_claim("aud", "token was not issued for this client"));
        }
        if required.exp + EXP_LEEWAY_SECS < Utc::now().timestamp() {
            return Err(AuthError::TokenExpired {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if required.sub.is_empty() {
            return Err(invalid_claim("sub", "subject cannot be empty"));
        }

        let text = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            sub: required.sub,
            name: text("name"),
            preferred_username: text("preferred_username"),
            email: text("email"),
            raw,
        })
    }

    /// Display name: `name`, then `preferred_username`, then `email`, then the subject.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.preferred_username.clone())
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.sub.clone())
    }

    /// Identity-only upsert partial; authorization fields are left to the store.
    pub fn to_partial(&self) -> PartialUserRecord {
        let origin = Origin::Oidc;
        let mut partial = PartialUserRecord::new()
            .with_id(origin.namespaced_id(&self.sub))
            .with_username(self.display_name())
            .with_email(self.email.clone().unwrap_or_default())
            .with_origin(origin);
        if let Some(key) = origin.extension_key() {
            partial = partial.with_extension(key, self.raw.clone());
        }
        partial
    }
}

#[track_caller]
fn invalid_claim(claim: &str, message: &str) -> AuthError {
    AuthError::InvalidClaim {
        claim: claim.to_string(),
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn decode_payload(id_token: &str) -> AuthErrorResult<Value> {
    let mut parts = id_token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(AuthError::InvalidToken {
            message: "ID token is not a compact JWS".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::InvalidToken {
            message: format!("ID token payload is not base64url: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    serde_json::from_slice(&bytes).map_err(|e| AuthError::InvalidToken {
        message: format!("ID token payload is not JSON: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}
