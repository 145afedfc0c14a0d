use crate::{Origin, PartialUserRecord, Role, UserRecord};

use googletest::prelude::*;
use proptest::prelude::{Just, Strategy, prop_assert_eq, prop_oneof, proptest};
use serde_json::json;

fn existing(role: Role, apps: Vec<String>) -> UserRecord {
    UserRecord::from_partial(
        PartialUserRecord::new()
            .with_id("u-1")
            .with_username("alice")
            .with_email("alice@example.com")
            .with_role(role)
            .with_allowed_apps(apps)
            .with_origin(Origin::Ticket),
    )
    .unwrap()
}

#[test]
fn given_partial_without_role_when_creating_then_defaults_applied() {
    let record = UserRecord::from_partial(PartialUserRecord::new().with_username("bob")).unwrap();

    assert_that!(record.role, eq(Role::User));
    assert_that!(record.allowed_apps, is_empty());
    assert_that!(record.origin, eq(Origin::Local));
    assert_that!(record.email, eq(""));
    assert_that!(record.id.is_empty(), eq(false));
}

#[test]
fn given_partial_without_username_when_creating_then_returns_error() {
    let result = UserRecord::from_partial(PartialUserRecord::new().with_id("x"));

    assert_that!(result, err(anything()));
}

#[test]
fn given_duplicate_apps_when_creating_then_duplicates_collapsed() {
    let record = UserRecord::from_partial(
        PartialUserRecord::new()
            .with_username("bob")
            .with_allowed_apps(vec!["a".into(), "b".into(), "a".into()]),
    )
    .unwrap();

    assert_eq!(record.allowed_apps, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn given_explicit_empty_apps_when_merging_then_apps_cleared() {
    let record = existing(Role::User, vec!["ag1".into()]);

    let merged = record.merge(PartialUserRecord::new().with_allowed_apps(vec![]));

    assert_that!(merged.allowed_apps, is_empty());
}

#[test]
fn given_explicit_role_when_merging_then_role_overwritten() {
    let record = existing(Role::Admin, vec![]);

    let merged = record.merge(PartialUserRecord::new().with_role(Role::User));

    assert_that!(merged.role, eq(Role::User));
}

#[test]
fn given_new_origin_when_merging_then_stored_origin_kept() {
    let record = existing(Role::User, vec![]);

    let merged = record.merge(PartialUserRecord::new().with_origin(Origin::Catalog));

    assert_that!(merged.origin, eq(Origin::Ticket));
}

#[test]
fn given_extension_when_merging_then_key_fully_replaced() {
    let record = existing(Role::User, vec![]).merge(
        PartialUserRecord::new().with_extension("ticket_data", json!({"a": 1, "b": 2})),
    );

    let merged =
        record.merge(PartialUserRecord::new().with_extension("ticket_data", json!({"c": 3})));

    assert_eq!(merged.origin_payload(Origin::Ticket), Some(&json!({"c": 3})));
}

#[test]
fn given_record_when_serialized_then_extensions_are_top_level_keys() {
    let record = existing(Role::User, vec!["ag1".into()])
        .merge(PartialUserRecord::new().with_extension("ticket_data", json!({"user": "alice"})));

    let value = serde_json::to_value(&record).unwrap();

    assert_that!(value["allowedApps"], eq(&json!(["ag1"])));
    assert_that!(value["ticket_data"]["user"], eq(&json!("alice")));
    assert_that!(value["origin"], eq(&json!("ticket")));
}

#[test]
fn given_legacy_json_without_origin_when_deserialized_then_defaults_applied() {
    let record: UserRecord =
        serde_json::from_value(json!({"id": "1", "username": "admin", "role": "admin"})).unwrap();

    assert_that!(record.origin, eq(Origin::Local));
    assert_that!(record.allowed_apps, is_empty());
    assert_that!(record.is_admin(), eq(true));
}

#[test]
fn given_admin_with_empty_allow_list_when_checking_access_then_allowed() {
    let record = existing(Role::Admin, vec![]);

    assert_that!(record.can_access_app("anything"), eq(true));
}

#[test]
fn given_user_when_checking_access_then_only_allow_list_passes() {
    let record = existing(Role::User, vec!["ag2".into()]);

    assert_that!(record.can_access_app("ag2"), eq(true));
    assert_that!(record.can_access_app("ag1"), eq(false));
}

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Admin), Just(Role::User)]
}

proptest! {
    #[test]
    fn merge_without_authorization_fields_keeps_role_and_apps(
        role in role_strategy(),
        apps in proptest::collection::btree_set("[a-z0-9]{1,8}", 0..6),
        username in proptest::option::of("[a-z]{1,10}"),
        email in proptest::option::of("[a-z]{1,10}@example\\.com"),
    ) {
        let apps: Vec<String> = apps.into_iter().collect();
        let record = existing(role, apps.clone());

        let mut partial = PartialUserRecord::new();
        partial.username = username;
        partial.email = email;
        let merged = record.merge(partial);

        prop_assert_eq!(merged.role, role);
        prop_assert_eq!(merged.allowed_apps, apps);
    }

    #[test]
    fn merge_never_changes_id(new_id in proptest::option::of("[a-z0-9-]{1,12}")) {
        let record = existing(Role::User, vec![]);

        let mut partial = PartialUserRecord::new().with_username("renamed");
        partial.id = new_id;
        let merged = record.merge(partial);

        prop_assert_eq!(merged.id, "u-1");
    }
}
