use serde::Deserialize;

/// Parsed with `Role::from_str` so an unknown role is a 400 naming the value
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}
