#![allow(dead_code)]

use portal_catalog::CatalogClient;
use portal_config::CatalogSettings;
use portal_store::{CatalogCache, UserStore};

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";
pub const WORKSPACE: &str = "default";

pub fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(CatalogSettings {
        base_url: server.uri(),
        api_key: API_KEY.to_string(),
        root_folder: "Portal".to_string(),
        workspace_id: WORKSPACE.to_string(),
        accept_invalid_certs: false,
    })
    .unwrap()
}

pub struct TestFiles {
    pub dir: TempDir,
    pub cache: CatalogCache,
    pub users: UserStore,
}

pub fn create_test_files() -> TestFiles {
    let dir = TempDir::new().unwrap();
    let cache = CatalogCache::new(dir.path().join("catalog.json"));
    let users = UserStore::new(dir.path().join("users.json"));
    TestFiles { dir, cache, users }
}

pub async fn mount_folders(server: &MockServer, folders: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/admin/api/workspace/{WORKSPACE}/APPLICATION/folder")))
        .and(header("authorization", format!("Bearer {API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": folders,
        })))
        .mount(server)
        .await;
}

pub async fn mount_apps(server: &MockServer, folder_id: &str, page: u32, apps: Value, total: u64) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/admin/api/workspace/{WORKSPACE}/application/{page}/30"
        )))
        .and(query_param("folder_id", folder_id))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": { "records": apps, "total": total },
        })))
        .mount(server)
        .await;
}

pub async fn mount_access_token(server: &MockServer, app_id: &str, token: &str) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/admin/api/workspace/{WORKSPACE}/application/{app_id}/access_token"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": { "access_token": token },
        })))
        .mount(server)
        .await;
}

pub async fn mount_roster(server: &MockServer, page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/admin/api/system/chat_user/user_manage/{page}/100"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
