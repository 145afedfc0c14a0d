use crate::password::{check_policy, hash_password, verify_password};
use crate::{AuthError, LoginOutcome, Result as AuthErrorResult, SessionIssuer};

use portal_core::{
    ErrorLocation, LocalCredential, Origin, PartialUserRecord, Role, UserRecord,
};
use portal_store::{CredentialStore, UserStore};

use std::panic::Location;

use log::{info, warn};

/// Username/password login backed by the local credential table.
pub struct LocalBridge<'a> {
    users: &'a UserStore,
    credentials: &'a CredentialStore,
}

impl<'a> LocalBridge<'a> {
    pub fn new(users: &'a UserStore, credentials: &'a CredentialStore) -> Self {
        Self { users, credentials }
    }

    pub async fn complete_login(
        &self,
        username: &str,
        password: &str,
        issuer: &SessionIssuer,
    ) -> AuthErrorResult<LoginOutcome> {
        let Some(credential) = self.credentials.find_by_username(username).await? else {
            return Err(self.reject_without_credential(username).await?);
        };

        if !verify_password(password, &credential.password) {
            warn!("Failed local login for {username}: wrong password");
            return Err(AuthError::InvalidCredentials {
                message: "incorrect password".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let user = match self.linked_user(&credential).await? {
            Some(user) => user,
            None => {
                self.users
                    .upsert(
                        PartialUserRecord::new()
                            .with_id(credential.id.clone())
                            .with_username(credential.username.clone())
                            .with_email(format!("{}@local.com", credential.username))
                            .with_role(credential.role)
                            .with_allowed_apps(Vec::new())
                            .with_origin(Origin::Local),
                    )
                    .await?
            }
        };

        let token = issuer.issue(&user)?;
        info!("Local login for {} ({})", user.username, user.id);

        Ok(LoginOutcome { user, token })
    }

    /// The user record a credential logs into: same id, else same username.
    async fn linked_user(
        &self,
        credential: &LocalCredential,
    ) -> AuthErrorResult<Option<UserRecord>> {
        if let Some(user) = self.users.find_by_id(&credential.id).await? {
            return Ok(Some(user));
        }
        Ok(self.users.find_by_username(&credential.username).await?)
    }

    /// Build the error for a username with no local credential.
    async fn reject_without_credential(&self, username: &str) -> AuthErrorResult<AuthError> {
        let location = ErrorLocation::from(Location::caller());

        Ok(match self.users.find_by_username(username).await? {
            None => AuthError::UnknownUser {
                username: username.to_string(),
                location,
            },
            Some(user) if user.origin.is_federated() => AuthError::WrongChannel {
                username: username.to_string(),
                channel: user.origin.login_channel(),
                location,
            },
            Some(_) => AuthError::InvalidCredentials {
                message: "no local password is set for this user".to_string(),
                location,
            },
        })
    }

    /// Change a user's own password after checking the current one.
    pub async fn change_password(
        &self,
        id: &str,
        old_password: &str,
        new_password: &str,
    ) -> AuthErrorResult<()> {
        let credential = self.credential(id).await?;

        if !verify_password(old_password, &credential.password) {
            return Err(AuthError::InvalidCredentials {
                message: "current password is incorrect".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        check_policy(new_password)?;

        self.credentials
            .set_password_hash(&credential.id, hash_password(new_password)?)
            .await?;
        info!("Password changed for {}", credential.username);
        Ok(())
    }

    /// Set a new password without the old one. Callers must gate this to admins.
    pub async fn reset_password(&self, id: &str, new_password: &str) -> AuthErrorResult<()> {
        let credential = self.credential(id).await?;
        check_policy(new_password)?;

        self.credentials
            .set_password_hash(&credential.id, hash_password(new_password)?)
            .await?;
        info!("Password reset for {}", credential.username);
        Ok(())
    }

    pub async fn create_credential(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> AuthErrorResult<LocalCredential> {
        check_policy(password)?;
        let credential = LocalCredential::new(username, hash_password(password)?, role);
        Ok(self.credentials.insert(credential).await?)
    }

    /// Create the configured admin credential unless one with that username exists.
    ///
    /// Returns whether a credential was created.
    pub async fn ensure_bootstrap_admin(
        &self,
        username: &str,
        password: &str,
    ) -> AuthErrorResult<bool> {
        if self.credentials.find_by_username(username).await?.is_some() {
            return Ok(false);
        }

        self.create_credential(username, password, Role::Admin)
            .await?;
        info!("Created bootstrap admin credential '{username}'");
        Ok(true)
    }

    /// Credential for a user id; records linked by username resolve through it.
    async fn credential(&self, id: &str) -> AuthErrorResult<LocalCredential> {
        if let Some(credential) = self.credentials.find_by_id(id).await? {
            return Ok(credential);
        }

        let linked = match self.users.find_by_id(id).await? {
            Some(user) => self.credentials.find_by_username(&user.username).await?,
            None => None,
        };
        linked.ok_or_else(|| AuthError::CredentialNotFound {
            id: id.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
