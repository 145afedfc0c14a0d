#![allow(dead_code)]

use portal_core::{Origin, PartialUserRecord, Role};
use portal_store::{CatalogCache, CredentialStore, UserStore};

use tempfile::TempDir;

pub struct TestStores {
    pub dir: TempDir,
    pub users: UserStore,
    pub credentials: CredentialStore,
    pub catalog: CatalogCache,
}

/// Fresh stores in an empty temp directory
pub fn create_test_stores() -> TestStores {
    let dir = TempDir::new().unwrap();
    let users = UserStore::new(dir.path().join("users.json"));
    let credentials = CredentialStore::new(dir.path().join("local-users.json"));
    let catalog = CatalogCache::new(dir.path().join("catalog.json"));
    TestStores {
        dir,
        users,
        credentials,
        catalog,
    }
}

/// A ticket-SSO login partial: identity only, no authorization fields
pub fn ticket_login(username: &str) -> PartialUserRecord {
    PartialUserRecord::new()
        .with_id(Origin::Ticket.namespaced_id(username))
        .with_username(username)
        .with_email(format!("{username}@example.com"))
        .with_origin(Origin::Ticket)
}

/// An admin-created record with explicit permissions
pub fn provisioned(id: &str, username: &str, role: Role, apps: &[&str]) -> PartialUserRecord {
    PartialUserRecord::new()
        .with_id(id)
        .with_username(username)
        .with_role(role)
        .with_allowed_apps(apps.iter().map(|a| a.to_string()).collect())
}
