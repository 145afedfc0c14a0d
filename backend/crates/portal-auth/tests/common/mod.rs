#![allow(dead_code)]

use portal_auth::SessionIssuer;
use portal_store::{CredentialStore, UserStore};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::Value;
use tempfile::TempDir;

pub const TEST_SECRET: &[u8] = b"integration-secret-key-32-bytes!";

pub struct TestContext {
    pub dir: TempDir,
    pub users: UserStore,
    pub credentials: CredentialStore,
    pub issuer: SessionIssuer,
}

pub fn create_test_context() -> TestContext {
    let dir = TempDir::new().unwrap();
    let users = UserStore::new(dir.path().join("users.json"));
    let credentials = CredentialStore::new(dir.path().join("local-users.json"));
    TestContext {
        dir,
        users,
        credentials,
        issuer: SessionIssuer::with_hs256(TEST_SECRET),
    }
}

/// Unsigned compact token wrapping `payload`, as a provider would return it
pub fn compact_token(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}
