use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub success: bool,
    pub message: String,
    pub categories: usize,
    pub agents: usize,
}
