use crate::{CliClientResult, ClientError};

use portal_core::Role;

use std::panic::Location;

use error_location::ErrorLocation;
use reqwest::{Client as ReqwestClient, Method};
use serde::Serialize;
use serde_json::Value;

/// HTTP client for the portal-server REST API
pub struct Client {
    pub base_url: String,
    pub token: Option<String>,
    client: ReqwestClient,
}

impl Client {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Server URL (e.g., "http://127.0.0.1:3001")
    /// * `token` - Session token sent as a bearer credential
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from).filter(|t| !t.is_empty()),
            client: ReqwestClient::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    /// Build a request carrying the session token
    #[track_caller]
    fn authed(&self, method: Method, path: &str) -> CliClientResult<reqwest::RequestBuilder> {
        let token = self.token.as_deref().ok_or_else(|| ClientError::MissingToken {
            location: ErrorLocation::from(Location::caller()),
        })?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    /// Execute request and turn `{success: false, error, code}` bodies into errors
    async fn execute(&self, req: reqwest::RequestBuilder) -> CliClientResult<Value> {
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
            let code = body
                .get("code")
                .and_then(Value::as_str)
                .unwrap_or("UNKNOWN")
                .to_string();
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            return Err(ClientError::api_error(status.as_u16(), code, message));
        }

        Ok(serde_json::from_str(&text)?)
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Log in with a local account; the response carries the session token
    pub async fn login(&self, username: &str, password: &str) -> CliClientResult<Value> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            username: &'a str,
            password: &'a str,
        }

        let req = self
            .request(Method::POST, "/api/auth/local-login")
            .json(&LoginRequest { username, password });
        self.execute(req).await
    }

    pub async fn me(&self) -> CliClientResult<Value> {
        let req = self.authed(Method::GET, "/api/auth/me")?;
        self.execute(req).await
    }

    pub async fn reset_password(&self, user_id: &str, new_password: &str) -> CliClientResult<Value> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ResetPasswordRequest<'a> {
            user_id: &'a str,
            new_password: &'a str,
        }

        let req = self
            .authed(Method::POST, "/api/auth/reset-password")?
            .json(&ResetPasswordRequest {
                user_id,
                new_password,
            });
        self.execute(req).await
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub async fn categories(&self) -> CliClientResult<Value> {
        let req = self.authed(Method::GET, "/api/catalog/categories")?;
        self.execute(req).await
    }

    pub async fn sync_catalog(&self) -> CliClientResult<Value> {
        let req = self.authed(Method::POST, "/api/catalog/sync")?;
        self.execute(req).await
    }

    pub async fn sync_users(&self) -> CliClientResult<Value> {
        let req = self.authed(Method::POST, "/api/catalog/sync-users")?;
        self.execute(req).await
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub async fn list_users(&self) -> CliClientResult<Value> {
        let req = self.authed(Method::GET, "/api/users")?;
        self.execute(req).await
    }

    pub async fn set_role(&self, id: &str, role: Role) -> CliClientResult<Value> {
        #[derive(Serialize)]
        struct SetRoleRequest {
            role: Role,
        }

        let req = self
            .authed(Method::PUT, &format!("/api/users/{id}/role"))?
            .json(&SetRoleRequest { role });
        self.execute(req).await
    }

    pub async fn set_apps(&self, id: &str, apps: &[String]) -> CliClientResult<Value> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct SetAppsRequest<'a> {
            allowed_apps: &'a [String],
        }

        let req = self
            .authed(Method::PUT, &format!("/api/users/{id}/apps"))?
            .json(&SetAppsRequest { allowed_apps: apps });
        self.execute(req).await
    }
}
