use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAppsRequest {
    #[serde(default)]
    pub allowed_apps: Value,
}
