use crate::SessionUserDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: SessionUserDto,
}
