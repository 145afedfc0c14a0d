use crate::api::{auth::auth, catalog::catalog, users::users};
use crate::{AppState, health};

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        // Login flows and session
        .route("/api/auth/login", get(auth::oidc_login))
        .route("/api/auth/callback", get(auth::oidc_callback))
        .route("/api/auth/cas/login", get(auth::cas_login))
        .route("/api/auth/cas/callback", get(auth::cas_callback))
        .route("/api/auth/local-login", post(auth::local_login))
        .route("/api/auth/change-password", post(auth::change_password))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/auth/me", get(auth::me))
        // Catalog
        .route("/api/catalog/categories", get(catalog::list_categories))
        .route("/api/catalog/apps/{app_id}/launch", get(catalog::launch_app))
        .route("/api/catalog/sync", post(catalog::sync))
        .route("/api/catalog/sync-users", post(catalog::sync_users))
        // User administration
        .route("/api/users", get(users::list_users))
        .route("/api/users/{id}/role", put(users::set_role))
        .route("/api/users/{id}/apps", put(users::set_apps))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
