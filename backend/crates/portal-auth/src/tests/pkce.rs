use crate::Pkce;
use crate::pkce::random_state;

#[test]
fn test_pkce_generation() {
    let pkce = Pkce::generate();

    assert_eq!(pkce.verifier.len(), 43);
    assert!(!pkce.challenge.is_empty());
    assert_ne!(pkce.verifier, pkce.challenge);
}

#[test]
fn test_pkce_matches_rfc7636_appendix_b() {
    let pkce = Pkce::from_verifier("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");

    assert_eq!(pkce.challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_pkce_generations_differ() {
    assert_ne!(Pkce::generate().verifier, Pkce::generate().verifier);
}

#[test]
fn test_random_state_is_url_safe() {
    let state = random_state();

    assert_eq!(state.len(), 22);
    assert!(
        state
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
}
