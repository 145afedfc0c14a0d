pub mod admin_user;
pub mod app_access;
pub mod current_user;
pub mod valid_json;
