use crate::api::extractors::current_user::CurrentUser;
use crate::{ApiError, ApiResult, AppState};

use portal_core::UserRecord;

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

/// An authenticated caller with the admin role.
pub struct AdminUser(pub UserRecord);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
            require_admin(&user)?;
            Ok(AdminUser(user))
        }
    }
}

#[track_caller]
pub fn require_admin(user: &UserRecord) -> ApiResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(ApiError::forbidden("Admin access required"))
    }
}
