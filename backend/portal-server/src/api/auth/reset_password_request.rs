use serde::Deserialize;

/// Admin-only password reset
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub user_id: String,
    pub new_password: String,
}
