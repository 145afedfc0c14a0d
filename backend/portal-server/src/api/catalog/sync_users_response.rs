use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SyncUsersResponse {
    pub success: bool,
    pub message: String,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub skipped: usize,
}
