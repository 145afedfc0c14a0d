use serde::{Deserialize, Serialize};

/// A chat application listed on the portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Absolute icon URL, or empty when the UI should show a placeholder
    #[serde(default)]
    pub icon: String,
    /// Chat URL opened when the agent is launched
    pub url: String,
}
