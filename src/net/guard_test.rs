use super::*;
use leptos::prelude::GetUntracked;

fn outcome_for(status: Option<u16>, probe: Option<VerifyOutcome>) -> InterceptOutcome {
    match first_pass(status) {
        FirstPass::Pass => InterceptOutcome::Ok,
        FirstPass::Reject => InterceptOutcome::AuthFailure,
        FirstPass::Error => InterceptOutcome::OtherError,
        FirstPass::Ambiguous => resolve_ambiguous(probe),
    }
}

// =============================================================
// First-pass classification
// =============================================================

#[test]
fn success_statuses_pass_through() {
    assert_eq!(first_pass(Some(200)), FirstPass::Pass);
    assert_eq!(first_pass(Some(204)), FirstPass::Pass);
}

#[test]
fn direct_401_is_rejected_without_a_probe() {
    assert_eq!(first_pass(Some(401)), FirstPass::Reject);
}

#[test]
fn server_errors_are_ambiguous() {
    assert_eq!(first_pass(Some(500)), FirstPass::Ambiguous);
    assert_eq!(first_pass(Some(503)), FirstPass::Ambiguous);
}

#[test]
fn transport_failure_without_status_is_ambiguous() {
    assert_eq!(first_pass(None), FirstPass::Ambiguous);
}

#[test]
fn other_client_errors_are_plain_errors() {
    assert_eq!(first_pass(Some(403)), FirstPass::Error);
    assert_eq!(first_pass(Some(404)), FirstPass::Error);
    assert_eq!(first_pass(Some(302)), FirstPass::Error);
}

// =============================================================
// Ambiguous-error resolution
// =============================================================

#[test]
fn server_error_with_healthy_verify_propagates() {
    // 500 followed by a verify 200: the original error reaches its
    // caller and no teardown happens.
    assert_eq!(
        outcome_for(Some(500), Some(VerifyOutcome::Valid)),
        InterceptOutcome::OtherError
    );
}

#[test]
fn server_error_with_invalid_verify_is_an_auth_failure() {
    // 500 followed by a verify 401: the session is dead.
    assert_eq!(
        outcome_for(Some(500), Some(VerifyOutcome::Invalid)),
        InterceptOutcome::AuthFailure
    );
}

#[test]
fn server_error_with_unreachable_verify_propagates() {
    assert_eq!(
        outcome_for(Some(500), Some(VerifyOutcome::Unknown)),
        InterceptOutcome::OtherError
    );
}

#[test]
fn transport_failure_follows_the_same_probe_rule() {
    assert_eq!(
        outcome_for(None, Some(VerifyOutcome::Invalid)),
        InterceptOutcome::AuthFailure
    );
    assert_eq!(
        outcome_for(None, Some(VerifyOutcome::Valid)),
        InterceptOutcome::OtherError
    );
}

#[test]
fn disabled_probe_never_escalates_ambiguous_errors() {
    assert_eq!(outcome_for(Some(500), None), InterceptOutcome::OtherError);
    assert_eq!(outcome_for(None, None), InterceptOutcome::OtherError);
}

#[test]
fn direct_401_ignores_probe_answers() {
    assert_eq!(
        outcome_for(Some(401), Some(VerifyOutcome::Valid)),
        InterceptOutcome::AuthFailure
    );
}

// =============================================================
// Teardown idempotence through the client
// =============================================================

#[test]
fn racing_teardowns_share_one_latch() {
    let session = RwSignal::new(SessionState::Verifying);
    let client = GuardedClient::new(session, GuardConfig::default());

    for _ in 0..10 {
        client.teardown();
    }

    assert!(session.get_untracked().is_invalidated());
    // The latch was consumed by the first teardown.
    assert!(!client.torn_down.arm());
}

#[test]
fn clones_share_latches() {
    let session = RwSignal::new(SessionState::Verifying);
    let client = GuardedClient::new(session, GuardConfig::default());
    let clone = client.clone();

    client.teardown();
    assert!(!clone.torn_down.arm());

    // The start latch is independent of teardown but shared across clones.
    assert!(clone.start_latch().arm());
    assert!(!client.start_latch().arm());
}

#[test]
fn default_config_probes_ambiguous_errors() {
    assert!(GuardConfig::default().probe_ambiguous);

    let session = RwSignal::new(SessionState::Unauthenticated);
    let client = GuardedClient::new(session, GuardConfig { probe_ambiguous: false });
    assert!(!client.config().probe_ambiguous);
}
