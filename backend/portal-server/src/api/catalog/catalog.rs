//! Catalog REST API handlers

use crate::api::extractors::admin_user::AdminUser;
use crate::api::extractors::app_access::{AppAccess, FromPath};
use crate::api::extractors::current_user::CurrentUser;
use crate::{
    ApiError, ApiResult, AppState, CategoryListResponse, LaunchDto, LaunchResponse, SyncResponse,
    SyncUsersResponse,
};

use portal_catalog::{CatalogClient, sync_catalog, sync_user_roster};
use portal_core::visible_categories;

use axum::{Json, extract::State};

/// GET /api/catalog/categories
///
/// The cached catalog, trimmed to the agents the caller may use
pub async fn list_categories(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<CategoryListResponse>> {
    let config = state.config()?;
    let categories = state.catalog_cache(&config).load().await?;

    Ok(Json(CategoryListResponse {
        success: true,
        data: visible_categories(&categories, &user),
    }))
}

/// GET /api/catalog/apps/{app_id}/launch
pub async fn launch_app(
    State(state): State<AppState>,
    access: AppAccess<FromPath>,
) -> ApiResult<Json<LaunchResponse>> {
    let config = state.config()?;
    let categories = state.catalog_cache(&config).load().await?;

    let agent = categories
        .iter()
        .find_map(|category| category.find_agent(&access.app_id))
        .ok_or_else(|| ApiError::not_found(format!("App {} not found", access.app_id)))?;

    log::info!("{} launched {}", access.user.username, agent.id);
    Ok(Json(LaunchResponse {
        success: true,
        data: LaunchDto::from(agent),
    }))
}

/// POST /api/catalog/sync
pub async fn sync(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<SyncResponse>> {
    let config = state.config()?;
    let client = CatalogClient::from_config(&config.catalog)?;

    log::info!("Catalog sync requested by {}", user.username);
    let summary = sync_catalog(&client, &state.catalog_cache(&config)).await?;

    Ok(Json(SyncResponse {
        success: true,
        message: "Sync completed".to_string(),
        categories: summary.categories,
        agents: summary.agents,
    }))
}

/// POST /api/catalog/sync-users
pub async fn sync_users(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> ApiResult<Json<SyncUsersResponse>> {
    let config = state.config()?;
    let client = CatalogClient::from_config(&config.catalog)?;

    log::info!("User roster sync requested by {}", admin.username);
    let summary = sync_user_roster(&client, &state.users(&config)).await?;

    Ok(Json(SyncUsersResponse {
        success: true,
        message: "User sync completed".to_string(),
        created: summary.created,
        updated: summary.updated,
        deleted: summary.deleted,
        skipped: summary.skipped,
    }))
}
