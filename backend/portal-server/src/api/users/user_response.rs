use portal_core::UserRecord;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub data: UserRecord,
}
