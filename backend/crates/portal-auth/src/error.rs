use portal_config::ConfigError;
use portal_store::StoreError;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("JWT encode failed: {source} {location}")]
    JwtEncode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Rate limit exceeded: {limit} attempts per {window_secs}s {location}")]
    RateLimitExceeded {
        limit: u32,
        window_secs: u64,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid credentials: {message} {location}")]
    InvalidCredentials {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unknown user '{username}' {location}")]
    UnknownUser {
        username: String,
        location: ErrorLocation,
    },

    #[error("No local credential for user {id} {location}")]
    CredentialNotFound { id: String, location: ErrorLocation },

    #[error("User '{username}' must sign in with {channel} {location}")]
    WrongChannel {
        username: String,
        channel: &'static str,
        location: ErrorLocation,
    },

    #[error("Password must be at least {min_length} characters {location}")]
    WeakPassword {
        min_length: usize,
        location: ErrorLocation,
    },

    #[error("Login flow rejected: {message} {location}")]
    InvalidFlow {
        message: String,
        location: ErrorLocation,
    },

    #[error("Authorization code rejected: {message} {location}")]
    InvalidGrant {
        message: String,
        location: ErrorLocation,
    },

    #[error("No identity claims: {message} {location}")]
    MissingClaims {
        message: String,
        location: ErrorLocation,
    },

    #[error("Ticket rejected ({code}): {message} {location}")]
    TicketRejected {
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("{service} error: {message} {location}")]
    Upstream {
        service: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP request failed: {source} {location}")]
    Http {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    PasswordHash {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::MissingHeader { .. } => "MISSING_AUTH_HEADER",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::JwtDecode { .. } => "JWT_DECODE_FAILED",
            Self::JwtEncode { .. } => "JWT_ENCODE_FAILED",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            Self::InvalidClaim { .. } => "INVALID_CLAIM",
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::UnknownUser { .. } => "UNKNOWN_USER",
            Self::CredentialNotFound { .. } => "CREDENTIAL_NOT_FOUND",
            Self::WrongChannel { .. } => "WRONG_LOGIN_CHANNEL",
            Self::WeakPassword { .. } => "WEAK_PASSWORD",
            Self::InvalidFlow { .. } => "INVALID_LOGIN_FLOW",
            Self::InvalidGrant { .. } => "INVALID_GRANT",
            Self::MissingClaims { .. } => "MISSING_CLAIMS",
            Self::TicketRejected { .. } => "TICKET_REJECTED",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::Http { .. } => "UPSTREAM_UNREACHABLE",
            Self::PasswordHash { .. } => "PASSWORD_HASH_FAILED",
            Self::Store(_) => "STORE_ERROR",
            Self::Config(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Failures caused by what the caller presented (credentials, ticket, code, token).
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidToken { .. }
                | Self::TokenExpired { .. }
                | Self::MissingHeader { .. }
                | Self::InvalidScheme { .. }
                | Self::JwtDecode { .. }
                | Self::InvalidClaim { .. }
                | Self::InvalidCredentials { .. }
                | Self::UnknownUser { .. }
                | Self::WrongChannel { .. }
                | Self::InvalidFlow { .. }
                | Self::InvalidGrant { .. }
                | Self::MissingClaims { .. }
                | Self::TicketRejected { .. }
        )
    }

    #[track_caller]
    pub(crate) fn http(source: reqwest::Error) -> Self {
        Self::Http {
            source,
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn upstream<S: Into<String>>(service: &'static str, message: S) -> Self {
        Self::Upstream {
            service,
            message: message.into(),
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
