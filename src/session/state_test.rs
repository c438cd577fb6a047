use super::*;

fn admin_claim() -> IdentityClaim {
    IdentityClaim {
        username: "root".to_owned(),
        is_admin: true,
        claims: serde_json::Map::new(),
    }
}

#[test]
fn default_is_unauthenticated() {
    assert_eq!(SessionState::default(), SessionState::Unauthenticated);
}

#[test]
fn claim_is_only_available_when_authenticated() {
    assert!(SessionState::Unauthenticated.claim().is_none());
    assert!(SessionState::Verifying.claim().is_none());
    assert!(SessionState::Invalidated.claim().is_none());

    let state = SessionState::Authenticated(admin_claim());
    assert_eq!(state.claim().map(|c| c.username.as_str()), Some("root"));
}

#[test]
fn admin_role_requires_an_authenticated_admin_claim() {
    assert!(SessionState::Authenticated(admin_claim()).is_admin());
    assert!(!SessionState::Authenticated(IdentityClaim::default()).is_admin());
    assert!(!SessionState::Verifying.is_admin());
}

#[test]
fn username_defaults_to_empty() {
    assert_eq!(SessionState::Unauthenticated.username(), "");
    assert_eq!(SessionState::Authenticated(admin_claim()).username(), "root");
}

#[test]
fn invalidated_is_detected() {
    assert!(SessionState::Invalidated.is_invalidated());
    assert!(!SessionState::Verifying.is_invalidated());
}
