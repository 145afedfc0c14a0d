use crate::{Client, ClientError};

use googletest::prelude::*;

#[test]
fn given_trailing_slash_when_creating_client_then_trimmed() {
    let client = Client::new("http://localhost:3001/", None);

    assert_that!(client.base_url, eq("http://localhost:3001"));
}

#[test]
fn given_empty_token_when_creating_client_then_treated_as_missing() {
    assert_that!(Client::new("http://localhost:3001", Some("")).token, none());
    assert_that!(
        Client::new("http://localhost:3001", Some("abc")).token,
        some(eq("abc"))
    );
}

#[tokio::test]
async fn given_no_token_when_calling_authed_endpoint_then_fails_before_sending() {
    // Nothing listens on port 9; a request attempt would surface as Http
    let client = Client::new("http://127.0.0.1:9", None);

    let result = client.me().await;

    assert!(matches!(result, Err(ClientError::MissingToken { .. })));
}
