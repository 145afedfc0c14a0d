use portal_core::UserRecord;

/// A completed login: the stored user record plus a fresh session token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: UserRecord,
    pub token: String,
}
