use crate::SessionUserDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: SessionUserDto,
}
