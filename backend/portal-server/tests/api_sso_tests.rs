//! Integration tests for the OIDC and ticket-SSO redirect flows
mod common;

use common::{FRONTEND_URL, TestApp, compact_token, get, json_body, location};

use portal_core::{Origin, Role};
use portal_server::FLOW_COOKIE_NAME;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use googletest::prelude::*;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CLIENT_ID: &str = "portal";
const SERVICE_URL: &str = "http://localhost:3001/api/auth/cas/callback";

async fn provider() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/openid-configuration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issuer": server.uri(),
            "authorization_endpoint": format!("{}/authorize", server.uri()),
            "token_endpoint": format!("{}/token", server.uri()),
        })))
        .mount(&server)
        .await;
    server
}

fn oidc_app(server: &MockServer) -> TestApp {
    let issuer = server.uri();
    TestApp::with_config(move |config| {
        config.oidc.issuer = Some(issuer);
        config.oidc.client_id = Some(CLIENT_ID.to_string());
        config.oidc.client_secret = Some("s3cret".to_string());
        config.oidc.redirect_uri = Some("http://localhost:3001/api/auth/callback".to_string());
    })
}

fn ticket_app(server: &MockServer) -> TestApp {
    let server_url = server.uri();
    TestApp::with_config(move |config| {
        config.ticket.server_url = Some(server_url);
        config.ticket.service_url = Some(SERVICE_URL.to_string());
    })
}

fn query_value(url: &str, key: &str) -> Option<String> {
    Url::parse(url)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// `name=value` part of the flow cookie set by /api/auth/login
fn flow_cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().to_string()
}

fn callback(query: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(format!("/api/auth/callback?{query}"));
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn given_oidc_configured_when_starting_login_then_302_with_flow_cookie() {
    // Given
    let server = provider().await;
    let app = oidc_app(&server);

    // When
    let response = app.send(get("/api/auth/login", None)).await;

    // Then
    assert_that!(response.status(), eq(StatusCode::FOUND));
    let target = location(&response);
    assert_that!(target, starts_with(format!("{}/authorize?", server.uri())));

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert_that!(set_cookie, starts_with(format!("{FLOW_COOKIE_NAME}=")));
    assert_that!(set_cookie, contains_substring("HttpOnly"));

    let state = query_value(&target, "state").unwrap();
    assert_that!(
        flow_cookie_pair(set_cookie),
        starts_with(format!("{FLOW_COOKIE_NAME}={state}."))
    );
}

#[tokio::test]
async fn given_oidc_not_configured_when_starting_login_then_500_configuration_error() {
    let app = TestApp::new();

    let (status, json) = json_body(app.send(get("/api/auth/login", None)).await).await;

    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(json["code"], "CONFIGURATION_ERROR");
}

#[tokio::test]
async fn given_full_oidc_round_trip_when_callback_then_redirects_to_frontend_with_token() {
    // Given: a login started against the provider
    let server = provider().await;
    let app = oidc_app(&server);
    let login = app.send(get("/api/auth/login", None)).await;
    let state = query_value(&location(&login), "state").unwrap();
    let cookie = flow_cookie_pair(
        login
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap(),
    );

    let now = chrono::Utc::now().timestamp();
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("code=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "at",
            "id_token": compact_token(&json!({
                "sub": "248289761001",
                "iss": server.uri(),
                "aud": CLIENT_ID,
                "exp": now + 300,
                "iat": now,
                "name": "Jane Doe",
                "email": "jane@example.com"
            })),
        })))
        .mount(&server)
        .await;

    // When
    let response = app
        .send(callback(&format!("code=abc123&state={state}"), Some(&cookie)))
        .await;

    // Then
    assert_that!(response.status(), eq(StatusCode::FOUND));
    let target = location(&response);
    assert_that!(target, starts_with(FRONTEND_URL));
    let token = query_value(&target, "token").unwrap();

    let cleared = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert_that!(cleared, contains_substring("Max-Age=0"));

    let users = app.users().get_all().await.unwrap();
    assert_that!(users.len(), eq(1));
    assert_that!(users[0].origin, eq(Origin::Oidc));
    assert_that!(users[0].role, eq(Role::User));

    let me = app.send(get("/api/auth/me", Some(&token))).await;
    assert_that!(me.status(), eq(StatusCode::OK));
}

#[tokio::test]
async fn given_missing_flow_cookie_when_callback_then_401() {
    let server = provider().await;
    let app = oidc_app(&server);

    let (status, json) = json_body(app.send(callback("code=abc&state=xyz", None)).await).await;

    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_eq!(json["code"], "INVALID_LOGIN_FLOW");
}

#[tokio::test]
async fn given_state_mismatch_when_callback_then_401_and_no_user_created() {
    let server = provider().await;
    let app = oidc_app(&server);
    let cookie = format!("{FLOW_COOKIE_NAME}=expected.verifier");

    let (status, json) = json_body(
        app.send(callback("code=abc&state=forged", Some(&cookie)))
            .await,
    )
    .await;

    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_eq!(json["code"], "INVALID_LOGIN_FLOW");
    assert_that!(app.users().get_all().await.unwrap(), is_empty());
}

#[tokio::test]
async fn given_provider_error_when_callback_then_401() {
    let server = provider().await;
    let app = oidc_app(&server);

    let response = app
        .send(callback("error=access_denied&state=xyz", None))
        .await;

    assert_that!(response.status(), eq(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn given_ticket_configured_when_starting_login_then_302_to_ticket_server() {
    let server = MockServer::start().await;
    let app = ticket_app(&server);

    let response = app.send(get("/api/auth/cas/login", None)).await;

    assert_that!(response.status(), eq(StatusCode::FOUND));
    let target = location(&response);
    assert_that!(target, starts_with(format!("{}/login?service=", server.uri())));
    assert_that!(query_value(&target, "service"), some(eq(SERVICE_URL)));
}

#[tokio::test]
async fn given_valid_ticket_when_callback_then_redirects_with_token_and_keeps_permissions() {
    // Given: an existing ticket user an admin already granted an app to
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/serviceValidate"))
        .and(query_param("ticket", "ST-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<cas:serviceResponse xmlns:cas="http://www.yale.edu/tp/cas">
  <cas:authenticationSuccess><cas:user>tim</cas:user></cas:authenticationSuccess>
</cas:serviceResponse>"#,
        ))
        .mount(&server)
        .await;
    let app = ticket_app(&server);
    app.seed_user("cas-tim", Role::User, &["ag2"]).await;

    // When
    let response = app
        .send(get("/api/auth/cas/callback?ticket=ST-1", None))
        .await;

    // Then
    assert_that!(response.status(), eq(StatusCode::FOUND));
    assert_that!(query_value(&location(&response), "token"), some(anything()));

    let user = app.users().find_by_id("cas-tim").await.unwrap().unwrap();
    assert_eq!(user.allowed_apps, vec!["ag2".to_string()]);
    assert_that!(user.username, eq("tim"));
}

#[tokio::test]
async fn given_rejected_ticket_when_callback_then_401_with_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/serviceValidate"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<cas:serviceResponse xmlns:cas="http://www.yale.edu/tp/cas">
  <cas:authenticationFailure code="INVALID_TICKET">Ticket ST-9 not recognized</cas:authenticationFailure>
</cas:serviceResponse>"#,
        ))
        .mount(&server)
        .await;
    let app = ticket_app(&server);

    let (status, json) = json_body(
        app.send(get("/api/auth/cas/callback?ticket=ST-9", None))
            .await,
    )
    .await;

    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_eq!(json["code"], "TICKET_REJECTED");
    assert_that!(
        json["error"].as_str().unwrap(),
        contains_substring("INVALID_TICKET")
    );
}

#[tokio::test]
async fn given_no_ticket_when_callback_then_400() {
    let server = MockServer::start().await;
    let app = ticket_app(&server);

    let response = app.send(get("/api/auth/cas/callback", None)).await;

    assert_that!(response.status(), eq(StatusCode::BAD_REQUEST));
}
