//! Response shapes of the Agent Catalog Service admin API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{code, message, data}` wrapper around every response
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Folder>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Application {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub icon_file_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct AccessToken {
    pub access_token: Option<String>,
}

/// One entry of the service's user directory, kept verbatim in `raw`.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterRecord {
    pub id: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub raw: Value,
}

impl RosterRecord {
    pub fn from_value(raw: Value) -> Self {
        let text = |key: &str| match raw.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        Self {
            id: text("id"),
            username: text("username"),
            name: text("name"),
            email: text("email"),
            raw,
        }
    }

    /// `username`, then `name`, then `email`, then the id.
    pub fn display_name(&self) -> Option<String> {
        self.username
            .clone()
            .or_else(|| self.name.clone())
            .or_else(|| self.email.clone())
            .or_else(|| self.id.clone())
    }
}

/// A roster page in any of the shapes the service has used:
/// `{data:{records:[..], total}}`, `{data:[..]}` or a bare array.
///
/// Returns the records and, for the paged shape, the reported total.
pub fn roster_records(body: Value) -> (Vec<Value>, Option<u64>) {
    match body {
        Value::Array(records) => (records, None),
        Value::Object(mut object) => match object.remove("data") {
            Some(Value::Array(records)) => (records, None),
            Some(Value::Object(mut data)) => {
                let total = data.get("total").and_then(Value::as_u64);
                match data.remove("records") {
                    Some(Value::Array(records)) => (records, total),
                    _ => (Vec::new(), total),
                }
            }
            _ => (Vec::new(), None),
        },
        _ => (Vec::new(), None),
    }
}
