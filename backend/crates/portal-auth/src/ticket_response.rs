//! Parsing of `serviceValidate` XML responses.
//!
//! Element names are matched on their local part, so `cas:user` and `user`
//! are treated alike.

use crate::{AuthError, Result as AuthErrorResult};

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::Value;

const SERVICE: &str = "ticket validation";

#[derive(Debug, Clone, PartialEq)]
pub enum TicketResponse {
    Success {
        user: String,
        /// Attribute name to string (or array of strings when repeated)
        attributes: BTreeMap<String, Value>,
    },
    Failure {
        code: String,
        message: String,
    },
}

impl TicketResponse {
    pub fn parse(xml: &str) -> AuthErrorResult<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut path: Vec<String> = Vec::new();
        let mut saw_success = false;
        let mut user = String::new();
        let mut attributes: BTreeMap<String, Value> = BTreeMap::new();
        let mut failure: Option<(String, String)> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| AuthError::upstream(SERVICE, format!("malformed XML: {e}")))?;

            match event {
                Event::Start(element) => {
                    let name = local_name(element.local_name().as_ref());
                    match name.as_str() {
                        "authenticationSuccess" => saw_success = true,
                        "authenticationFailure" => {
                            let code = element
                                .try_get_attribute("code")
                                .map_err(|e| AuthError::upstream(SERVICE, e.to_string()))?
                                .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
                                .unwrap_or_default();
                            failure = Some((code, String::new()));
                        }
                        _ => {}
                    }
                    path.push(name);
                }
                Event::Empty(element) => {
                    let name = local_name(element.local_name().as_ref());
                    if path.last().is_some_and(|p| p == "attributes") {
                        insert_attribute(&mut attributes, name, String::new());
                    }
                }
                Event::Text(text) => {
                    let value = text
                        .unescape()
                        .map_err(|e| AuthError::upstream(SERVICE, format!("malformed XML: {e}")))?
                        .trim()
                        .to_string();
                    apply_text(&path, value, &mut user, &mut attributes, &mut failure);
                }
                Event::CData(data) => {
                    let value = String::from_utf8_lossy(&data).trim().to_string();
                    apply_text(&path, value, &mut user, &mut attributes, &mut failure);
                }
                Event::End(_) => {
                    path.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if saw_success && !user.is_empty() {
            return Ok(Self::Success { user, attributes });
        }

        Ok(match failure {
            Some((code, message)) => Self::Failure {
                code: if code.is_empty() {
                    "UNKNOWN".to_string()
                } else {
                    code
                },
                message: if message.is_empty() {
                    "Unknown error".to_string()
                } else {
                    message
                },
            },
            None => Self::Failure {
                code: "UNKNOWN".to_string(),
                message: "Unknown error".to_string(),
            },
        })
    }
}

fn local_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn apply_text(
    path: &[String],
    value: String,
    user: &mut String,
    attributes: &mut BTreeMap<String, Value>,
    failure: &mut Option<(String, String)>,
) {
    let Some(current) = path.last() else {
        return;
    };
    let parent = path.len().checked_sub(2).and_then(|i| path.get(i));

    match (parent.map(String::as_str), current.as_str()) {
        (Some("authenticationSuccess"), "user") => *user = value,
        (Some("attributes"), name) => insert_attribute(attributes, name.to_string(), value),
        (_, "authenticationFailure") => {
            if let Some((_, message)) = failure {
                message.push_str(&value);
            }
        }
        _ => {}
    }
}

fn insert_attribute(attributes: &mut BTreeMap<String, Value>, name: String, value: String) {
    match attributes.get_mut(&name) {
        Some(Value::Array(values)) => values.push(Value::String(value)),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, Value::String(value)]);
        }
        None => {
            attributes.insert(name, Value::String(value));
        }
    }
}
