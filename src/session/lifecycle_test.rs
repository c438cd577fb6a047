use super::*;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use leptos::prelude::GetUntracked;

// =============================================================
// OnceLatch
// =============================================================

#[test]
fn latch_arms_exactly_once() {
    let latch = OnceLatch::new();
    assert!(latch.arm());
    assert!(!latch.arm());
    assert!(!latch.arm());
}

#[test]
fn latch_arms_once_across_many_racing_callers() {
    // Ten requests all hitting an auth failure around the same time must
    // produce one effective teardown.
    let latch = OnceLatch::new();
    let armed = (0..10).filter(|_| latch.arm()).count();
    assert_eq!(armed, 1);
}

// =============================================================
// Teardown
// =============================================================

#[test]
fn teardown_always_invalidates_and_is_terminal() {
    let session = RwSignal::new(SessionState::Verifying);
    let latch = OnceLatch::new();

    teardown(session, &latch);
    assert!(session.get_untracked().is_invalidated());

    // Redundant teardown keeps the state terminal and does not panic.
    teardown(session, &latch);
    assert!(session.get_untracked().is_invalidated());
}

// =============================================================
// Claim resolution
// =============================================================

#[test]
fn resolved_claim_decodes_a_valid_credential() {
    let token = URL_SAFE_NO_PAD.encode(br#"{"username":"ops","is_admin":true}"#);
    let claim = resolved_claim(&token);
    assert_eq!(claim.username, "ops");
    assert!(claim.is_admin);
}

#[test]
fn resolved_claim_falls_back_to_unknown_on_garbage() {
    // Decode failure alone must not force a logout once the verifier has
    // said the session is valid; the claim just degrades to unknown.
    let claim = resolved_claim("!!not-a-token!!");
    assert_eq!(claim, IdentityClaim::default());
    assert!(!claim.is_admin);
}
