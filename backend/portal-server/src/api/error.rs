//! REST API error types
//!
//! Every failure becomes `{"success": false, "error": <message>, "code": <CODE>}`.
//! Upstream, configuration and internal details stay in the server log.

use portal_auth::AuthError;
use portal_catalog::CatalogError;
use portal_config::ConfigError;
use portal_core::CoreError;
use portal_store::StoreError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error code (e.g., "UNAUTHORIZED", "VALIDATION_ERROR")
    pub code: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad or missing credentials, ticket, code or session token (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        code: &'static str,
        location: ErrorLocation,
    },

    /// Role or allow-list denial (403)
    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Bad request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Login throttled (429)
    #[error("Too many requests: {message} {location}")]
    TooManyRequests {
        message: String,
        location: ErrorLocation,
    },

    /// OIDC provider, ticket server or Catalog Service failure (500)
    #[error("Upstream failure: {message} {location}")]
    Upstream {
        message: String,
        location: ErrorLocation,
    },

    /// Missing or invalid setting (500)
    #[error("Configuration error: {message} {location}")]
    Configuration {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
            code: "UNAUTHORIZED",
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation<S: Into<String>>(message: S, field: Option<&str>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.map(str::to_string),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Validation { .. } | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Upstream { .. } | Self::Configuration { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let (error, code, field) = match self {
            ApiError::Unauthorized { message, code, .. } => (message, code, None),
            ApiError::Forbidden { message, .. } => (message, "FORBIDDEN", None),
            ApiError::Validation { message, field, .. } => (message, "VALIDATION_ERROR", field),
            ApiError::BadRequest { message, .. } => (message, "BAD_REQUEST", None),
            ApiError::NotFound { message, .. } => (message, "NOT_FOUND", None),
            ApiError::TooManyRequests { message, .. } => (message, "TOO_MANY_REQUESTS", None),
            ApiError::Upstream { .. } => (
                "An upstream service failed".to_string(),
                "UPSTREAM_ERROR",
                None,
            ),
            ApiError::Configuration { .. } => (
                "Server is not configured for this operation".to_string(),
                "CONFIGURATION_ERROR",
                None,
            ),
            ApiError::Internal { .. } => (
                "Server internal error".to_string(),
                "INTERNAL_ERROR",
                None,
            ),
        };

        (
            status,
            Json(ApiErrorResponse {
                success: false,
                error,
                code: code.to_string(),
                field,
            }),
        )
            .into_response()
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if e.is_authentication_failure() {
            log::warn!("Authentication failed: {e}");
            let message = match &e {
                AuthError::InvalidCredentials { .. } | AuthError::UnknownUser { .. } => {
                    "Invalid username or password".to_string()
                }
                AuthError::WrongChannel { channel, .. } => {
                    format!("This account signs in with {channel}")
                }
                AuthError::TokenExpired { .. } => "Session expired".to_string(),
                AuthError::TicketRejected { code, message, .. } => {
                    format!("Ticket validation failed ({code}): {message}")
                }
                AuthError::InvalidFlow { .. } => "Login flow expired or invalid".to_string(),
                AuthError::InvalidGrant { message, .. } => format!("Login rejected: {message}"),
                AuthError::MissingHeader { .. } | AuthError::InvalidScheme { .. } => {
                    "Missing bearer token".to_string()
                }
                _ => "Authentication failed".to_string(),
            };
            return ApiError::Unauthorized {
                message,
                code: e.error_code(),
                location,
            };
        }

        match e {
            AuthError::RateLimitExceeded { window_secs, .. } => ApiError::TooManyRequests {
                message: format!("Too many login attempts, try again in {window_secs}s"),
                location,
            },
            AuthError::WeakPassword { min_length, .. } => ApiError::Validation {
                message: format!("Password must be at least {min_length} characters"),
                field: Some("newPassword".to_string()),
                location,
            },
            AuthError::CredentialNotFound { .. } => ApiError::NotFound {
                message: "No local password exists for this user".to_string(),
                location,
            },
            AuthError::Upstream { .. } | AuthError::Http { .. } => ApiError::Upstream {
                message: e.to_string(),
                location,
            },
            AuthError::Config(source) => source.into(),
            AuthError::Store(source) => source.into(),
            other => ApiError::Internal {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<StoreError> for ApiError {
    #[track_caller]
    fn from(e: StoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            StoreError::Conflict { message, .. } => ApiError::Validation {
                message,
                field: None,
                location,
            },
            other => ApiError::Internal {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<CatalogError> for ApiError {
    #[track_caller]
    fn from(e: CatalogError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            CatalogError::Config(source) => source.into(),
            CatalogError::Store(source) => source.into(),
            other => ApiError::Upstream {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<ConfigError> for ApiError {
    #[track_caller]
    fn from(e: ConfigError) -> Self {
        ApiError::Configuration {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        let (message, field) = match e {
            CoreError::Validation { message, .. } => (message, None),
            CoreError::InvalidRole { value, .. } => {
                (format!("Invalid role '{value}'"), Some("role".to_string()))
            }
            CoreError::InvalidOrigin { value, .. } => {
                (format!("Invalid origin '{value}'"), Some("origin".to_string()))
            }
        };
        ApiError::Validation {
            message,
            field,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
