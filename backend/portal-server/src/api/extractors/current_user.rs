//! Bearer-token authentication for REST handlers

use crate::{ApiError, AppState};

use portal_auth::bearer_token;
use portal_core::UserRecord;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// The caller's current user record.
///
/// Loaded from the store on every request rather than trusted from the
/// token, so role and allow-list changes apply immediately.
pub struct CurrentUser(pub UserRecord);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());
            let token = bearer_token(header)?;

            let config = state.config()?;
            let claims = state
                .session_issuer(&config)?
                .verify(token)
                .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;

            let user = state
                .users(&config)
                .find_by_id(&claims.id)
                .await?
                .ok_or_else(|| {
                    log::warn!("Token for unknown user {}", claims.id);
                    ApiError::unauthorized("User not found")
                })?;

            log::debug!("Authenticated {} ({})", user.username, user.id);
            Ok(CurrentUser(user))
        }
    }
}
