use portal_core::Agent;

use serde::Serialize;

/// What the browser needs to open an agent's chat
#[derive(Debug, Clone, Serialize)]
pub struct LaunchDto {
    pub id: String,
    pub title: String,
    pub url: String,
}

impl From<&Agent> for LaunchDto {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id.clone(),
            title: agent.title.clone(),
            url: agent.url.clone(),
        }
    }
}
