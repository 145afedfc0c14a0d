use portal_core::Category;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub success: bool,
    pub data: Vec<Category>,
}
