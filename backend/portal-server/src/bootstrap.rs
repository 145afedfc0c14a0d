use crate::AppState;
use crate::error::Result as ServerErrorResult;

use portal_auth::LocalBridge;

/// Create the configured admin credential on first start.
///
/// Does nothing unless both `bootstrap.admin_username` and
/// `bootstrap.admin_password` are set. Returns whether a credential was created.
pub async fn ensure_bootstrap_admin(state: &AppState) -> ServerErrorResult<bool> {
    let config = state.config.current()?;
    let Some((username, password)) = config.bootstrap.admin() else {
        log::debug!("No bootstrap admin configured");
        return Ok(false);
    };

    let users = state.users(&config);
    let credentials = state.credentials(&config);
    let created = LocalBridge::new(&users, &credentials)
        .ensure_bootstrap_admin(username, password)
        .await?;
    Ok(created)
}
