#![allow(dead_code)]

//! Test infrastructure for portal-server API tests

use portal_auth::{LocalBridge, SessionIssuer};
use portal_config::{Config, ConfigSource, LoginRateLimitConfig};
use portal_core::{Agent, Category, PartialUserRecord, Role, UserRecord};
use portal_server::{AppState, build_router};
use portal_store::{CatalogCache, CredentialStore, UserStore};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "portal-server-test-secret-0123456789";
pub const FRONTEND_URL: &str = "http://portal.test/";
pub const TEST_PASSWORD: &str = "correct-horse";

pub struct TestApp {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Session secret and frontend are always set; `customize` adds the rest.
    pub fn with_config(customize: impl FnOnce(&mut Config)) -> Self {
        let dir = TempDir::new().unwrap();

        let mut config = Config::default();
        config.session.secret = Some(TEST_SECRET.to_string());
        config.frontend.base_url = Some(FRONTEND_URL.to_string());
        customize(&mut config);

        let rate_limit = config.login_rate_limit.clone();
        let state = AppState::new(
            ConfigSource::fixed(config),
            dir.path().to_path_buf(),
            rate_limit,
        )
        .unwrap();

        Self { dir, state }
    }

    pub fn with_rate_limit(max_attempts: u32) -> Self {
        Self::with_config(|config| {
            config.login_rate_limit = LoginRateLimitConfig {
                max_attempts,
                window_secs: 60,
            }
        })
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub fn users(&self) -> UserStore {
        UserStore::new(self.dir.path().join("users.json"))
    }

    pub fn credentials(&self) -> CredentialStore {
        CredentialStore::new(self.dir.path().join("local-users.json"))
    }

    pub fn catalog(&self) -> CatalogCache {
        CatalogCache::new(self.dir.path().join("catalog.json"))
    }

    pub async fn seed_user(&self, id: &str, role: Role, apps: &[&str]) -> UserRecord {
        self.users()
            .upsert(
                PartialUserRecord::new()
                    .with_id(id)
                    .with_username(id)
                    .with_role(role)
                    .with_allowed_apps(apps.iter().map(|a| a.to_string()).collect()),
            )
            .await
            .unwrap()
    }

    /// Local credential plus the matching user record (created at first login).
    pub async fn seed_local_account(&self, username: &str, role: Role) -> String {
        let users = self.users();
        let credentials = self.credentials();
        let credential = LocalBridge::new(&users, &credentials)
            .create_credential(username, TEST_PASSWORD, role)
            .await
            .unwrap();
        credential.id
    }

    pub fn token_for(&self, user: &UserRecord) -> String {
        SessionIssuer::with_hs256(TEST_SECRET.as_bytes())
            .issue(user)
            .unwrap()
    }

    pub async fn seed_catalog(&self) {
        self.catalog().replace(&support_and_docs()).await.unwrap();
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router().oneshot(request).await.unwrap()
    }
}

pub fn agent(id: &str) -> Agent {
    Agent {
        id: id.to_string(),
        title: id.to_uppercase(),
        description: String::new(),
        icon: String::new(),
        url: format!("https://catalog.test/chat/{id}"),
    }
}

/// "Support" with ag1 and ag2, "Docs" with ag3
pub fn support_and_docs() -> Vec<Category> {
    let mut support = Category::new("support", "Support");
    support.agents = vec![agent("ag1"), agent("ag2")];
    let mut docs = Category::new("docs", "Docs");
    docs.agents = vec![agent("ag3")];
    vec![support, docs]
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request("GET", uri, token, None)
}

pub fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    request("POST", uri, token, Some(body))
}

pub fn put_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    request("PUT", uri, token, Some(body))
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

/// Unsigned compact token wrapping `payload`, as a provider would return it
pub fn compact_token(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}
