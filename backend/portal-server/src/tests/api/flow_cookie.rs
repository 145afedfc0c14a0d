use crate::FlowCookie;

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use googletest::prelude::*;

fn headers(cookie: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
    headers
}

#[test]
fn given_flow_cookie_when_set_then_scoped_short_lived_and_http_only() {
    let cookie = FlowCookie::new("st4te", "v3rifier").to_set_cookie();

    assert_that!(cookie, starts_with("portal_oidc_flow=st4te.v3rifier;"));
    assert_that!(cookie, contains_substring("Path=/api/auth"));
    assert_that!(cookie, contains_substring("Max-Age=60"));
    assert_that!(cookie, contains_substring("HttpOnly"));
    assert_that!(cookie, contains_substring("Secure"));
}

#[test]
fn given_cookie_among_others_when_parsed_then_flow_is_found() {
    let parsed = FlowCookie::from_headers(&headers("theme=dark; portal_oidc_flow=abc.def; x=1"));

    assert_that!(parsed, some(eq(&FlowCookie::new("abc", "def"))));
}

#[test]
fn given_no_or_broken_cookie_when_parsed_then_none() {
    assert_that!(FlowCookie::from_headers(&HeaderMap::new()), none());
    assert_that!(
        FlowCookie::from_headers(&headers("portal_oidc_flow=nodot")),
        none()
    );
    assert_that!(
        FlowCookie::from_headers(&headers("portal_oidc_flow=.verifier")),
        none()
    );
}

#[test]
fn given_clear_cookie_then_expires_immediately() {
    assert_that!(FlowCookie::clear(), contains_substring("Max-Age=0"));
}
