//! Short-lived cookie carrying the OIDC `state` and PKCE verifier between
//! the login redirect and the callback.

use axum::http::{HeaderMap, header::COOKIE};

pub const FLOW_COOKIE_NAME: &str = "portal_oidc_flow";
const FLOW_COOKIE_MAX_AGE_SECS: u32 = 60;
const FLOW_COOKIE_PATH: &str = "/api/auth";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowCookie {
    pub state: String,
    pub verifier: String,
}

impl FlowCookie {
    pub fn new(state: impl Into<String>, verifier: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            verifier: verifier.into(),
        }
    }

    /// `Set-Cookie` value. Both parts are base64url, so `.` is a safe separator.
    pub fn to_set_cookie(&self) -> String {
        format!(
            "{FLOW_COOKIE_NAME}={}.{}; Path={FLOW_COOKIE_PATH}; Max-Age={FLOW_COOKIE_MAX_AGE_SECS}; HttpOnly; Secure; SameSite=Lax",
            self.state, self.verifier
        )
    }

    /// `Set-Cookie` value that deletes the flow cookie.
    pub fn clear() -> String {
        format!(
            "{FLOW_COOKIE_NAME}=; Path={FLOW_COOKIE_PATH}; Max-Age=0; HttpOnly; Secure; SameSite=Lax"
        )
    }

    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .find_map(|cookie| {
                let (name, value) = cookie.trim().split_once('=')?;
                if name != FLOW_COOKIE_NAME {
                    return None;
                }
                let (state, verifier) = value.split_once('.')?;
                if state.is_empty() || verifier.is_empty() {
                    return None;
                }
                Some(Self::new(state, verifier))
            })
    }
}
