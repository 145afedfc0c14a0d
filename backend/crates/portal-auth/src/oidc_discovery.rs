//! OpenID provider metadata discovery, memoized per issuer.

use crate::{AuthError, Result as AuthErrorResult};

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use serde::Deserialize;
use tokio::sync::RwLock;

const WELL_KNOWN_PATH: &str = "/.well-known/openid-configuration";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderMetadata {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    #[serde(default)]
    pub userinfo_endpoint: Option<String>,
}

/// Process-lifetime cache of discovered provider metadata.
///
/// Entries are keyed by the configured issuer URL, so pointing the portal at
/// a different issuer triggers a fresh discovery. Entries are only dropped by
/// [`DiscoveryCache::invalidate`] or a restart.
#[derive(Default)]
pub struct DiscoveryCache {
    entries: RwLock<HashMap<String, Arc<ProviderMetadata>>>,
}

impl DiscoveryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_discover(
        &self,
        http: &reqwest::Client,
        issuer: &str,
    ) -> AuthErrorResult<Arc<ProviderMetadata>> {
        let key = issuer.trim_end_matches('/').to_string();

        if let Some(metadata) = self.entries.read().await.get(&key) {
            return Ok(Arc::clone(metadata));
        }

        let metadata = Arc::new(discover(http, &key).await?);
        info!("Discovered OIDC provider {}", metadata.issuer);

        let mut entries = self.entries.write().await;
        let stored = entries.entry(key).or_insert(metadata);
        Ok(Arc::clone(stored))
    }

    pub async fn invalidate(&self) {
        self.entries.write().await.clear();
    }
}

async fn discover(http: &reqwest::Client, issuer: &str) -> AuthErrorResult<ProviderMetadata> {
    let url = format!("{issuer}{WELL_KNOWN_PATH}");
    debug!("Fetching OIDC discovery document from {url}");

    let response = http.get(&url).send().await.map_err(AuthError::http)?;

    if !response.status().is_success() {
        return Err(AuthError::upstream(
            "OIDC discovery",
            format!("{url} returned {}", response.status()),
        ));
    }

    response.json::<ProviderMetadata>().await.map_err(|e| {
        AuthError::upstream("OIDC discovery", format!("malformed discovery document: {e}"))
    })
}
