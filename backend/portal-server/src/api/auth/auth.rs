//! Login, session and password handlers
//!
//! OIDC and ticket-SSO flows finish with a 302 to the frontend carrying the
//! session token as `?token=`. Local login answers with JSON.

use crate::api::extractors::admin_user::AdminUser;
use crate::api::extractors::current_user::CurrentUser;
use crate::api::extractors::valid_json::ValidJson;
use crate::{
    ApiError, ApiResult, AppState, ChangePasswordRequest, FlowCookie, LocalLoginRequest,
    LoginResponse, MeResponse, OidcCallbackQuery, ResetPasswordRequest, SessionUserDto,
    SuccessResponse, TicketCallbackQuery,
};

use portal_auth::{AuthError, LocalBridge, TicketBridge};
use portal_config::Config;

use std::panic::Location;

use axum::{
    Json,
    extract::{Query, State},
    http::{
        HeaderMap, StatusCode,
        header::{LOCATION, SET_COOKIE},
    },
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use url::Url;

// =============================================================================
// OIDC
// =============================================================================

/// GET /api/auth/login
pub async fn oidc_login(State(state): State<AppState>) -> ApiResult<Response> {
    let config = state.config()?;
    let settings = config.oidc.resolve()?;

    let redirect = state.oidc.begin_login(&settings).await?;
    let cookie = FlowCookie::new(redirect.state, redirect.verifier);

    Ok((
        StatusCode::FOUND,
        [(LOCATION, redirect.url), (SET_COOKIE, cookie.to_set_cookie())],
    )
        .into_response())
}

/// GET /api/auth/callback?code&state
pub async fn oidc_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<OidcCallbackQuery>,
) -> ApiResult<Response> {
    if let Some(error) = query.error {
        let detail = query.error_description.unwrap_or(error);
        return Err(ApiError::unauthorized(format!("Login rejected: {detail}")));
    }

    let flow =
        FlowCookie::from_headers(&headers).ok_or_else(|| invalid_flow("flow cookie missing"))?;
    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::bad_request("Authorization code missing"))?;
    if query.state.as_deref() != Some(flow.state.as_str()) {
        return Err(invalid_flow("state mismatch"));
    }

    let config = state.config()?;
    let settings = config.oidc.resolve()?;
    let users = state.users(&config);
    let issuer = state.session_issuer(&config)?;

    let outcome = state
        .oidc
        .complete_login(&settings, &code, &flow.verifier, &users, &issuer)
        .await?;

    Ok((
        StatusCode::FOUND,
        [
            (LOCATION, frontend_redirect(&config, &outcome.token)?),
            (SET_COOKIE, FlowCookie::clear()),
        ],
    )
        .into_response())
}

#[track_caller]
fn invalid_flow(message: &str) -> ApiError {
    AuthError::InvalidFlow {
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into()
}

// =============================================================================
// Ticket SSO
// =============================================================================

/// GET /api/auth/cas/login
pub async fn cas_login(State(state): State<AppState>) -> ApiResult<Response> {
    let config = state.config()?;
    let settings = config.ticket.resolve()?;
    let url = TicketBridge::login_url(&settings)?;

    Ok((StatusCode::FOUND, [(LOCATION, url)]).into_response())
}

/// GET /api/auth/cas/callback?ticket
pub async fn cas_callback(
    State(state): State<AppState>,
    Query(query): Query<TicketCallbackQuery>,
) -> ApiResult<Response> {
    let ticket = query
        .ticket
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("Ticket missing"))?;

    let config = state.config()?;
    let settings = config.ticket.resolve()?;
    let users = state.users(&config);
    let issuer = state.session_issuer(&config)?;

    let outcome = state
        .ticket
        .complete_login(&settings, &ticket, &users, &issuer)
        .await?;

    Ok((
        StatusCode::FOUND,
        [(LOCATION, frontend_redirect(&config, &outcome.token)?)],
    )
        .into_response())
}

/// `{frontend}?token={token}`
fn frontend_redirect(config: &Config, token: &str) -> ApiResult<String> {
    let base = config.frontend.resolve()?;
    let mut url = Url::parse(&base).map_err(|e| ApiError::Configuration {
        message: format!("frontend.base_url '{base}' is not a valid URL: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;
    url.query_pairs_mut().append_pair("token", token);
    Ok(url.to_string())
}

// =============================================================================
// Local accounts
// =============================================================================

/// POST /api/auth/local-login
pub async fn local_login(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<LocalLoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let username = request.username.trim();
    if username.is_empty() || request.password.is_empty() {
        return Err(ApiError::validation(
            "Username and password are required",
            None,
        ));
    }

    state.login_limiter.check(username)?;

    let config = state.config()?;
    let users = state.users(&config);
    let credentials = state.credentials(&config);
    let issuer = state.session_issuer(&config)?;

    let outcome = LocalBridge::new(&users, &credentials)
        .complete_login(username, &request.password, &issuer)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        token: outcome.token,
        user: SessionUserDto::from(&outcome.user),
    }))
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidJson(request): ValidJson<ChangePasswordRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let config = state.config()?;
    let users = state.users(&config);
    let credentials = state.credentials(&config);

    LocalBridge::new(&users, &credentials)
        .change_password(&user.id, &request.old_password, &request.new_password)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidJson(request): ValidJson<ResetPasswordRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let config = state.config()?;
    let users = state.users(&config);
    let credentials = state.credentials(&config);

    LocalBridge::new(&users, &credentials)
        .reset_password(&request.user_id, &request.new_password)
        .await?;
    log::info!("{} reset the password of {}", admin.username, request.user_id);

    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        success: true,
        user: SessionUserDto::from(&user),
    })
}
