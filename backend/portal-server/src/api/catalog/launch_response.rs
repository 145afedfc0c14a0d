use crate::LaunchDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LaunchResponse {
    pub success: bool,
    pub data: LaunchDto,
}
