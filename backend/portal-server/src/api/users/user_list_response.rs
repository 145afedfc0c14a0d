use portal_core::UserRecord;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub data: Vec<UserRecord>,
}
