//! Allow-list gate for per-application endpoints

use crate::api::extractors::current_user::CurrentUser;
use crate::{ApiError, ApiResult, AppState};

use portal_core::UserRecord;

use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};

/// Where a gated endpoint finds the target application id.
pub trait AppIdSource {
    fn app_id(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Option<String>> + Send;
}

/// The `{app_id}` path segment
pub struct FromPath;

impl AppIdSource for FromPath {
    #[allow(clippy::manual_async_fn)]
    fn app_id(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Option<String>> + Send {
        async move {
            let Path(mut params) =
                Path::<HashMap<String, String>>::from_request_parts(parts, state)
                    .await
                    .ok()?;
            params.remove("app_id")
        }
    }
}

/// The `?app_id=` query parameter
pub struct FromQuery;

impl AppIdSource for FromQuery {
    #[allow(clippy::manual_async_fn)]
    fn app_id(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Option<String>> + Send {
        async move {
            let Query(mut params) =
                Query::<HashMap<String, String>>::from_request_parts(parts, state)
                    .await
                    .ok()?;
            params.remove("app_id")
        }
    }
}

/// An authenticated caller allowed to use the application named by `S`.
pub struct AppAccess<S> {
    pub user: UserRecord,
    pub app_id: String,
    source: PhantomData<S>,
}

impl<S> FromRequestParts<AppState> for AppAccess<S>
where
    S: AppIdSource + Send + Sync,
{
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
            let app_id = S::app_id(parts, state).await;
            let app_id = require_app_access(&user, app_id.as_deref())?;

            Ok(AppAccess {
                user,
                app_id,
                source: PhantomData,
            })
        }
    }
}

/// Admins pass for any id; everyone else needs the id in `allowedApps`.
#[track_caller]
pub fn require_app_access(user: &UserRecord, app_id: Option<&str>) -> ApiResult<String> {
    let app_id = app_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("App ID missing"))?;

    if user.can_access_app(app_id) {
        Ok(app_id.to_string())
    } else {
        Err(ApiError::forbidden("You do not have access to this app"))
    }
}
