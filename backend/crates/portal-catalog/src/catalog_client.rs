use crate::wire::{AccessToken, Application, Envelope, Folder, Page, roster_records};
use crate::{CatalogError, Result as CatalogErrorResult};

use portal_config::{CatalogConfig, CatalogSettings};

use std::time::Duration;

use log::debug;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Applications fetched per page
pub const APPLICATION_PAGE_SIZE: u32 = 30;
/// Roster entries fetched per page
pub const ROSTER_PAGE_SIZE: u32 = 100;
/// Hard stop for runaway pagination
const MAX_PAGES: u32 = 1000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bearer-authenticated client for the Agent Catalog Service admin API.
pub struct CatalogClient {
    http: reqwest::Client,
    settings: CatalogSettings,
}

impl CatalogClient {
    pub fn new(settings: CatalogSettings) -> CatalogErrorResult<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::http(&settings.base_url, e))?;

        Ok(Self { http, settings })
    }

    /// Resolve the `catalog` section now, failing on missing settings.
    pub fn from_config(config: &CatalogConfig) -> CatalogErrorResult<Self> {
        Self::new(config.resolve()?)
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    fn workspace_url(&self, path: &str) -> String {
        format!(
            "{}/admin/api/workspace/{}/{path}",
            self.settings.base_url, self.settings.workspace_id
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> CatalogErrorResult<T> {
        debug!("GET {url}");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.settings.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::http(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::upstream(format!("GET {url} returned {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::upstream(format!("malformed response from {url}: {e}")))
    }

    /// The workspace's application folder tree.
    pub async fn folders(&self) -> CatalogErrorResult<Vec<Folder>> {
        let url = self.workspace_url("APPLICATION/folder");
        let envelope: Envelope<Vec<Folder>> = self.get_json(&url).await?;

        envelope.data.ok_or_else(|| {
            CatalogError::upstream(format!(
                "folder listing has no data (code {:?}, message {:?})",
                envelope.code, envelope.message
            ))
        })
    }

    /// Every application in `folder_id`, across all pages.
    pub async fn applications(&self, folder_id: &str) -> CatalogErrorResult<Vec<Application>> {
        let mut applications = Vec::new();

        for page in 1..=MAX_PAGES {
            let mut url = Url::parse(&self.workspace_url(&format!(
                "application/{page}/{APPLICATION_PAGE_SIZE}"
            )))
            .map_err(|e| CatalogError::upstream(format!("invalid base url: {e}")))?;
            url.query_pairs_mut().append_pair("folder_id", folder_id);

            let envelope: Envelope<Page<Application>> = self.get_json(url.as_str()).await?;
            let Some(Page { records, total }) = envelope.data else {
                break;
            };

            let fetched = records.len();
            applications.extend(records);

            if is_last_page(fetched, applications.len(), total, APPLICATION_PAGE_SIZE) {
                break;
            }
        }

        Ok(applications)
    }

    /// Per-application chat access token, `None` when the service declines.
    pub async fn access_token(&self, app_id: &str) -> CatalogErrorResult<Option<String>> {
        let url = self.workspace_url(&format!("application/{app_id}/access_token"));
        let envelope: Envelope<AccessToken> = self.get_json(&url).await?;

        if envelope.code != Some(200) {
            return Ok(None);
        }
        Ok(envelope
            .data
            .and_then(|d| d.access_token)
            .filter(|token| !token.is_empty()))
    }

    /// The service's own user directory, across all pages, as raw records.
    pub async fn roster(&self) -> CatalogErrorResult<Vec<Value>> {
        let mut roster = Vec::new();

        for page in 1..=MAX_PAGES {
            let url = format!(
                "{}/admin/api/system/chat_user/user_manage/{page}/{ROSTER_PAGE_SIZE}",
                self.settings.base_url
            );
            let body: Value = self.get_json(&url).await?;
            let (records, total) = roster_records(body);

            let fetched = records.len();
            roster.extend(records);

            // Unpaged shapes return everything at once
            if total.is_none() && fetched < ROSTER_PAGE_SIZE as usize {
                break;
            }
            if is_last_page(fetched, roster.len(), total, ROSTER_PAGE_SIZE) {
                break;
            }
        }

        Ok(roster)
    }
}

fn is_last_page(fetched: usize, collected: usize, total: Option<u64>, page_size: u32) -> bool {
    fetched == 0
        || fetched < page_size as usize
        || total.is_some_and(|total| collected as u64 >= total)
}
