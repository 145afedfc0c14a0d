pub mod auth;
pub mod change_password_request;
pub mod flow_cookie;
pub mod local_login_request;
pub mod login_response;
pub mod me_response;
pub mod oidc_callback_query;
pub mod reset_password_request;
pub mod session_user_dto;
pub mod success_response;
pub mod ticket_callback_query;
