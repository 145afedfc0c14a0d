use crate::{
    AuthError, LoginOutcome, Result as AuthErrorResult, SessionIssuer, TicketResponse,
};

use portal_config::TicketSettings;
use portal_core::{ErrorLocation, Origin, PartialUserRecord};
use portal_store::UserStore;

use std::collections::BTreeMap;
use std::panic::Location;

use log::{info, warn};
use serde_json::{Value, json};
use url::Url;

/// Redirect-and-validate login against a ticket SSO server.
pub struct TicketBridge {
    http: reqwest::Client,
}

impl TicketBridge {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// `{server}/login?service={service}`
    pub fn login_url(settings: &TicketSettings) -> AuthErrorResult<String> {
        let mut url = endpoint(settings, "login")?;
        url.query_pairs_mut()
            .append_pair("service", &settings.service_url);
        Ok(url.to_string())
    }

    pub async fn complete_login(
        &self,
        settings: &TicketSettings,
        ticket: &str,
        users: &UserStore,
        issuer: &SessionIssuer,
    ) -> AuthErrorResult<LoginOutcome> {
        let response = self.validate_ticket(settings, ticket).await?;

        let (username, attributes) = match response {
            TicketResponse::Success { user, attributes } => (user, attributes),
            TicketResponse::Failure { code, message } => {
                warn!("Ticket validation failed ({code}): {message}");
                return Err(AuthError::TicketRejected {
                    code,
                    message,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let user = users.upsert(to_partial(&username, attributes)).await?;
        let token = issuer.issue(&user)?;
        info!("Ticket SSO login for {} ({})", user.username, user.id);

        Ok(LoginOutcome { user, token })
    }

    async fn validate_ticket(
        &self,
        settings: &TicketSettings,
        ticket: &str,
    ) -> AuthErrorResult<TicketResponse> {
        let mut url = endpoint(settings, "serviceValidate")?;
        url.query_pairs_mut()
            .append_pair("service", &settings.service_url)
            .append_pair("ticket", ticket);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(AuthError::http)?;

        if !response.status().is_success() {
            return Err(AuthError::upstream(
                "ticket validation",
                format!("serviceValidate returned {}", response.status()),
            ));
        }

        let body = response.text().await.map_err(AuthError::http)?;
        TicketResponse::parse(&body)
    }
}

fn endpoint(settings: &TicketSettings, path: &str) -> AuthErrorResult<Url> {
    let base = settings.server_url.trim_end_matches('/');
    Url::parse(&format!("{base}/{path}"))
        .map_err(|e| AuthError::upstream("ticket SSO", format!("invalid server url: {e}")))
}

/// Identity-only upsert partial; role and allow-list stay with the store.
fn to_partial(username: &str, attributes: BTreeMap<String, Value>) -> PartialUserRecord {
    let origin = Origin::Ticket;
    let email = attributes
        .get("email")
        .and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Array(values) => values.first().and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .unwrap_or_default();

    let mut partial = PartialUserRecord::new()
        .with_id(origin.namespaced_id(username))
        .with_username(username)
        .with_email(email)
        .with_origin(origin);
    if let Some(key) = origin.extension_key() {
        partial = partial.with_extension(
            key,
            json!({
                "username": username,
                "attributes": attributes,
            }),
        );
    }
    partial
}
