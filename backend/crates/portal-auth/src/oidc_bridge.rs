use crate::pkce::random_state;
use crate::{
    AuthError, DiscoveryCache, IdTokenClaims, LoginOutcome, Pkce, Result as AuthErrorResult,
    SessionIssuer,
};

use portal_config::OidcSettings;
use portal_core::ErrorLocation;
use portal_store::UserStore;

use std::panic::Location;

use log::{debug, info};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use url::Url;

const SCOPES: &str = "openid profile email";

/// Where to send the browser, plus the per-flow secrets the caller must
/// keep (in a short-lived cookie) until the callback.
#[derive(Debug, Clone)]
pub struct LoginRedirect {
    pub url: String,
    pub state: String,
    pub verifier: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    error_description: Option<String>,
}

/// Authorization-code-with-PKCE login against an OpenID provider.
pub struct OidcBridge {
    http: reqwest::Client,
    discovery: DiscoveryCache,
}

impl OidcBridge {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            discovery: DiscoveryCache::new(),
        }
    }

    pub fn discovery(&self) -> &DiscoveryCache {
        &self.discovery
    }

    pub async fn begin_login(&self, settings: &OidcSettings) -> AuthErrorResult<LoginRedirect> {
        let metadata = self
            .discovery
            .get_or_discover(&self.http, &settings.issuer)
            .await?;

        let pkce = Pkce::generate();
        let state = random_state();

        let mut url = Url::parse(&metadata.authorization_endpoint).map_err(|e| {
            AuthError::upstream(
                "OIDC discovery",
                format!("invalid authorization_endpoint: {e}"),
            )
        })?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &settings.client_id)
            .append_pair("redirect_uri", &settings.redirect_uri)
            .append_pair("scope", SCOPES)
            .append_pair("state", &state)
            .append_pair("code_challenge", &pkce.challenge)
            .append_pair("code_challenge_method", "S256");

        Ok(LoginRedirect {
            url: url.to_string(),
            state,
            verifier: pkce.verifier,
        })
    }

    /// Exchange `code`, check the ID token, upsert the user and mint a session.
    pub async fn complete_login(
        &self,
        settings: &OidcSettings,
        code: &str,
        verifier: &str,
        users: &UserStore,
        issuer: &SessionIssuer,
    ) -> AuthErrorResult<LoginOutcome> {
        let metadata = self
            .discovery
            .get_or_discover(&self.http, &settings.issuer)
            .await?;

        let id_token = self
            .exchange_code(&metadata.token_endpoint, settings, code, verifier)
            .await?;
        let claims = IdTokenClaims::from_id_token(&id_token, &metadata.issuer, &settings.client_id)?;

        let user = users.upsert(claims.to_partial()).await?;
        let token = issuer.issue(&user)?;
        info!("OIDC login for {} ({})", user.username, user.id);

        Ok(LoginOutcome { user, token })
    }

    async fn exchange_code(
        &self,
        token_endpoint: &str,
        settings: &OidcSettings,
        code: &str,
        verifier: &str,
    ) -> AuthErrorResult<String> {
        debug!("Exchanging authorization code at {token_endpoint}");

        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "authorization_code")
            .append_pair("code", code)
            .append_pair("redirect_uri", &settings.redirect_uri)
            .append_pair("client_id", &settings.client_id)
            .append_pair("client_secret", &settings.client_secret)
            .append_pair("code_verifier", verifier)
            .finish();

        let response = self
            .http
            .post(token_endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(AuthError::http)?;

        let status = response.status();
        let text = response.text().await.map_err(AuthError::http)?;

        if let Ok(error) = serde_json::from_str::<TokenErrorResponse>(&text)
            && !error.error.is_empty()
        {
            let message = error.error_description.unwrap_or(error.error);
            return Err(AuthError::InvalidGrant {
                message,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !status.is_success() {
            return Err(AuthError::upstream(
                "OIDC token endpoint",
                format!("returned {status}"),
            ));
        }

        let tokens: TokenResponse = serde_json::from_str(&text).map_err(|e| {
            AuthError::upstream("OIDC token endpoint", format!("malformed response: {e}"))
        })?;

        tokens
            .id_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::MissingClaims {
                message: "token response has no id_token".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
