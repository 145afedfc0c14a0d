use crate::Role;

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Admin.as_str(), "admin");
    assert_eq!(Role::User.as_str(), "user");
}

#[test]
fn test_role_from_str() {
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("user").unwrap(), Role::User);
    assert!(Role::from_str("superuser").is_err());
    assert!(Role::from_str("Admin").is_err());
}

#[test]
fn test_role_default() {
    assert_eq!(Role::default(), Role::User);
}

#[test]
fn test_role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
}
