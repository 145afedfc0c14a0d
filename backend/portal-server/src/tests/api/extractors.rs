use crate::api::extractors::admin_user::require_admin;
use crate::api::extractors::app_access::require_app_access;
use crate::{AdminUser, ApiError, AppState, CurrentUser};

use portal_auth::SessionIssuer;
use portal_config::{Config, ConfigSource, LoginRateLimitConfig};
use portal_core::{PartialUserRecord, Role, UserRecord};

use axum::{body::Body, extract::FromRequestParts, http::Request};
use googletest::prelude::*;
use tempfile::TempDir;

const SECRET: &str = "extractor-test-secret-0123456789abcdef";

fn user(role: Role, apps: &[&str]) -> UserRecord {
    UserRecord::from_partial(
        PartialUserRecord::new()
            .with_id("u1")
            .with_username("alice")
            .with_role(role)
            .with_allowed_apps(apps.iter().map(|a| a.to_string()).collect()),
    )
    .unwrap()
}

fn test_state(dir: &TempDir) -> AppState {
    let mut config = Config::default();
    config.session.secret = Some(SECRET.to_string());
    AppState::new(
        ConfigSource::fixed(config),
        dir.path().to_path_buf(),
        LoginRateLimitConfig::default(),
    )
    .unwrap()
}

fn request_with_token(token: Option<&str>) -> axum::http::request::Parts {
    let mut builder = Request::builder().uri("/api/auth/me");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap().into_parts().0
}

#[test]
fn given_admin_with_no_apps_when_gated_then_any_app_passes() {
    let admin = user(Role::Admin, &[]);

    assert_that!(
        require_app_access(&admin, Some("anything")),
        ok(eq("anything"))
    );
}

#[test]
fn given_user_without_app_when_gated_then_forbidden() {
    let caller = user(Role::User, &["ag2"]);

    assert!(matches!(
        require_app_access(&caller, Some("ag1")),
        Err(ApiError::Forbidden { .. })
    ));
    assert_that!(require_app_access(&caller, Some("ag2")), ok(eq("ag2")));
}

#[test]
fn given_no_app_id_when_gated_then_bad_request() {
    let admin = user(Role::Admin, &[]);

    assert!(matches!(
        require_app_access(&admin, None),
        Err(ApiError::BadRequest { .. })
    ));
    assert!(matches!(
        require_app_access(&admin, Some("  ")),
        Err(ApiError::BadRequest { .. })
    ));
}

#[test]
fn given_plain_user_when_admin_required_then_forbidden() {
    assert!(matches!(
        require_admin(&user(Role::User, &[])),
        Err(ApiError::Forbidden { .. })
    ));
    assert_that!(require_admin(&user(Role::Admin, &[])), ok(anything()));
}

#[tokio::test]
async fn given_valid_token_when_extracting_then_current_record_is_loaded() {
    // Given: a stored user whose role changed after the token was issued
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    let config = state.config().unwrap();
    let stored = state
        .users(&config)
        .upsert(
            PartialUserRecord::new()
                .with_id("u1")
                .with_username("alice")
                .with_role(Role::User),
        )
        .await
        .unwrap();
    let token = SessionIssuer::with_hs256(SECRET.as_bytes())
        .issue(&stored)
        .unwrap();
    state
        .users(&config)
        .update_permissions("u1", portal_core::PermissionUpdate::role(Role::Admin))
        .await
        .unwrap();

    // When
    let mut parts = request_with_token(Some(&token));
    let CurrentUser(user) = CurrentUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();

    // Then: the stored role wins over the token claim
    assert_that!(user.id, eq("u1"));
    assert_that!(user.role, eq(Role::Admin));
}

#[tokio::test]
async fn given_token_for_deleted_user_when_extracting_then_unauthorized() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    let token = SessionIssuer::with_hs256(SECRET.as_bytes())
        .issue(&user(Role::Admin, &[]))
        .unwrap();

    let mut parts = request_with_token(Some(&token));
    let result = CurrentUser::from_request_parts(&mut parts, &state).await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[tokio::test]
async fn given_missing_header_when_extracting_admin_then_unauthorized() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let mut parts = request_with_token(None);
    let result = AdminUser::from_request_parts(&mut parts, &state).await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}
