//! User administration handlers (admin only)

use crate::api::extractors::admin_user::AdminUser;
use crate::api::extractors::valid_json::ValidJson;
use crate::{
    ApiError, ApiResult, AppState, SetAppsRequest, SetRoleRequest, UserListResponse, UserResponse,
};

use portal_core::{PermissionUpdate, Role};

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<UserListResponse>> {
    let config = state.config()?;
    let users = state.users(&config).get_all().await?;

    Ok(Json(UserListResponse {
        success: true,
        data: users,
    }))
}

/// PUT /api/users/{id}/role
pub async fn set_role(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    ValidJson(request): ValidJson<SetRoleRequest>,
) -> ApiResult<Json<UserResponse>> {
    let role = Role::from_str(request.role.trim())?;
    log::info!("{} sets role of {id} to {role}", admin.username);

    update_permissions(&state, &id, PermissionUpdate::role(role)).await
}

/// PUT /api/users/{id}/apps
pub async fn set_apps(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    ValidJson(request): ValidJson<SetAppsRequest>,
) -> ApiResult<Json<UserResponse>> {
    let apps = parse_app_ids(request.allowed_apps)?;
    log::info!("{} sets {} apps for {id}", admin.username, apps.len());

    update_permissions(&state, &id, PermissionUpdate::allowed_apps(apps)).await
}

async fn update_permissions(
    state: &AppState,
    id: &str,
    update: PermissionUpdate,
) -> ApiResult<Json<UserResponse>> {
    let config = state.config()?;
    let user = state
        .users(&config)
        .update_permissions(id, update)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserResponse {
        success: true,
        data: user,
    }))
}

/// `allowedApps` must be an array of non-empty strings.
#[track_caller]
pub(crate) fn parse_app_ids(value: Value) -> ApiResult<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(ApiError::validation(
            "allowedApps must be an array",
            Some("allowedApps"),
        ));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(id) if !id.trim().is_empty() => Ok(id.trim().to_string()),
            _ => Err(ApiError::validation(
                "allowedApps must contain only non-empty app ids",
                Some("allowedApps"),
            )),
        })
        .collect()
}
