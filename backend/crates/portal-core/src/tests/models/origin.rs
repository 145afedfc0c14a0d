use crate::Origin;

use std::str::FromStr;

#[test]
fn test_origin_round_trips_through_str() {
    for origin in [Origin::Local, Origin::Oidc, Origin::Ticket, Origin::Catalog] {
        assert_eq!(Origin::from_str(origin.as_str()).unwrap(), origin);
    }
    assert!(Origin::from_str("ldap").is_err());
}

#[test]
fn test_origin_namespaced_ids() {
    assert_eq!(Origin::Oidc.namespaced_id("abc"), "oidc-abc");
    assert_eq!(Origin::Ticket.namespaced_id("alice"), "cas-alice");
    assert_eq!(Origin::Catalog.namespaced_id("42"), "42");
    assert_eq!(Origin::Local.namespaced_id("42"), "42");
}

#[test]
fn test_origin_extension_keys() {
    assert_eq!(Origin::Local.extension_key(), None);
    assert_eq!(Origin::Oidc.extension_key(), Some("oidc_data"));
    assert_eq!(Origin::Ticket.extension_key(), Some("ticket_data"));
    assert_eq!(Origin::Catalog.extension_key(), Some("catalog_data"));
}

#[test]
fn test_origin_federation() {
    assert!(!Origin::Local.is_federated());
    assert!(Origin::Oidc.is_federated());
    assert!(Origin::Ticket.is_federated());
    assert!(Origin::Catalog.is_federated());
}
