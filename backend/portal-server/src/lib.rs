pub mod api;
pub mod bootstrap;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod scheduler;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        change_password_request::ChangePasswordRequest,
        flow_cookie::{FLOW_COOKIE_NAME, FlowCookie},
        local_login_request::LocalLoginRequest,
        login_response::LoginResponse,
        me_response::MeResponse,
        oidc_callback_query::OidcCallbackQuery,
        reset_password_request::ResetPasswordRequest,
        session_user_dto::SessionUserDto,
        success_response::SuccessResponse,
        ticket_callback_query::TicketCallbackQuery,
    },
    catalog::{
        category_list_response::CategoryListResponse, launch_dto::LaunchDto,
        launch_response::LaunchResponse, sync_response::SyncResponse,
        sync_users_response::SyncUsersResponse,
    },
    error::ApiError,
    error::ApiErrorResponse,
    error::Result as ApiResult,
    extractors::{
        admin_user::AdminUser,
        app_access::{AppAccess, FromPath, FromQuery},
        current_user::CurrentUser,
        valid_json::ValidJson,
    },
    users::{
        set_apps_request::SetAppsRequest, set_role_request::SetRoleRequest,
        user_list_response::UserListResponse, user_response::UserResponse,
    },
};
pub use error::ServerError;
pub use state::AppState;

pub use crate::routes::build_router;
