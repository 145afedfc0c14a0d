use crate::ApiError;

use portal_auth::AuthError;
use portal_core::{CoreError, ErrorLocation};

use std::panic::Location;

use axum::{http::StatusCode, response::IntoResponse};
use googletest::prelude::*;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_not_found_when_rendered_then_404_with_flat_body() {
    let (status, json) = body_json(ApiError::not_found("User not found")).await;

    assert_that!(status, eq(StatusCode::NOT_FOUND));
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "User not found");
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json.get("field").is_none());
}

#[tokio::test]
async fn given_validation_with_field_when_rendered_then_400_carries_field() {
    let (status, json) =
        body_json(ApiError::validation("allowedApps must be an array", Some("allowedApps"))).await;

    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "allowedApps");
}

#[tokio::test]
async fn given_upstream_failure_when_rendered_then_details_are_hidden() {
    let error = ApiError::Upstream {
        message: "GET https://catalog.internal/admin/api returned 502".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(json["error"], "An upstream service failed");
    assert_eq!(json["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn given_wrong_password_when_converted_then_401_without_hinting_which_part_failed() {
    let auth = AuthError::InvalidCredentials {
        message: "incorrect password".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(ApiError::from(auth)).await;

    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_eq!(json["error"], "Invalid username or password");
    assert_eq!(json["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn given_wrong_channel_when_converted_then_message_names_the_channel() {
    let auth = AuthError::WrongChannel {
        username: "tim".to_string(),
        channel: "ticket SSO",
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(ApiError::from(auth)).await;

    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_that!(
        json["error"].as_str().unwrap(),
        contains_substring("ticket SSO")
    );
}

#[test]
fn given_rate_limit_when_converted_then_too_many_requests() {
    let auth = AuthError::RateLimitExceeded {
        limit: 5,
        window_secs: 60,
        location: ErrorLocation::from(Location::caller()),
    };

    assert_that!(ApiError::from(auth).status(), eq(StatusCode::TOO_MANY_REQUESTS));
}

#[test]
fn given_invalid_role_when_converted_then_validation_on_role_field() {
    let core = CoreError::InvalidRole {
        value: "superuser".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    match ApiError::from(core) {
        ApiError::Validation { message, field, .. } => {
            assert_that!(message, eq("Invalid role 'superuser'"));
            assert_that!(field, some(eq("role")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn given_missing_setting_when_converted_then_configuration_error() {
    let config = portal_config::ConfigError::missing("oidc.issuer", "PORTAL_OIDC_ISSUER");

    assert!(matches!(
        ApiError::from(config),
        ApiError::Configuration { .. }
    ));
}
