use crate::ConfigErrorResult;
use crate::error::require_url;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FrontendConfig {
    /// Where SSO callbacks send the browser with `?token=`
    pub base_url: Option<String>,
}

impl FrontendConfig {
    pub fn resolve(&self) -> ConfigErrorResult<String> {
        require_url(self.base_url.as_deref(), "frontend.base_url", "PORTAL_FRONTEND_URL")
    }
}
