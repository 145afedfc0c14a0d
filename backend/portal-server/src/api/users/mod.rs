pub mod set_apps_request;
pub mod set_role_request;
pub mod user_list_response;
pub mod user_response;
pub mod users;
