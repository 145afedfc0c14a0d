use crate::ConfigErrorResult;
use crate::error::{require, require_url};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OidcConfig {
    pub issuer: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

/// Fully resolved OIDC client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidcSettings {
    pub issuer: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl OidcConfig {
    pub fn resolve(&self) -> ConfigErrorResult<OidcSettings> {
        Ok(OidcSettings {
            issuer: require_url(self.issuer.as_deref(), "oidc.issuer", "PORTAL_OIDC_ISSUER")?,
            client_id: require(
                self.client_id.as_deref(),
                "oidc.client_id",
                "PORTAL_OIDC_CLIENT_ID",
            )?,
            client_secret: require(
                self.client_secret.as_deref(),
                "oidc.client_secret",
                "PORTAL_OIDC_CLIENT_SECRET",
            )?,
            redirect_uri: require_url(
                self.redirect_uri.as_deref(),
                "oidc.redirect_uri",
                "PORTAL_OIDC_REDIRECT_URI",
            )?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.issuer.is_some()
    }
}
