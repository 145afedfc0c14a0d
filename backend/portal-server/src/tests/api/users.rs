use crate::ApiError;
use crate::api::users::users::parse_app_ids;

use googletest::prelude::*;
use serde_json::json;

#[test]
fn given_array_of_ids_when_parsed_then_trimmed_ids_returned() {
    let apps = parse_app_ids(json!(["ag1", " ag2 "])).unwrap();

    assert_eq!(apps, vec!["ag1".to_string(), "ag2".to_string()]);
}

#[test]
fn given_empty_array_when_parsed_then_empty_list() {
    assert_that!(parse_app_ids(json!([])).unwrap(), is_empty());
}

#[test]
fn given_non_array_when_parsed_then_validation_error() {
    for value in [json!("ag1"), json!(null), json!({"ag1": true})] {
        assert!(matches!(
            parse_app_ids(value),
            Err(ApiError::Validation { .. })
        ));
    }
}

#[test]
fn given_non_string_entry_when_parsed_then_validation_error() {
    assert!(matches!(
        parse_app_ids(json!(["ag1", 7])),
        Err(ApiError::Validation { .. })
    ));
}
