use crate::ConfigErrorResult;
use crate::error::require_url;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TicketConfig {
    /// Base URL of the ticket SSO server (e.g. `https://sso.example.com/cas`)
    pub server_url: Option<String>,
    /// Callback URL registered with the SSO server
    pub service_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSettings {
    pub server_url: String,
    pub service_url: String,
}

impl TicketConfig {
    pub fn resolve(&self) -> ConfigErrorResult<TicketSettings> {
        let server_url = require_url(
            self.server_url.as_deref(),
            "ticket.server_url",
            "PORTAL_TICKET_SERVER_URL",
        )?;

        Ok(TicketSettings {
            server_url: server_url.trim_end_matches('/').to_string(),
            service_url: require_url(
                self.service_url.as_deref(),
                "ticket.service_url",
                "PORTAL_TICKET_SERVICE_URL",
            )?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.server_url.is_some()
    }
}
