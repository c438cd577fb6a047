//! Session lifecycle: startup decision and teardown.
//!
//! `start` drives the once-per-page-load sequence: find a credential,
//! verify it against the server, decode the advisory claim, and open the
//! console, or redirect to the login entry point. `teardown` is the
//! single exit path for a dead session (cookie delete plus a full-page
//! navigation to `/login`) and may be reached concurrently from several
//! in-flight requests, so its side effects sit behind an at-most-once
//! latch rather than a lock.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::{RwSignal, Set};

use super::claims::{self, IdentityClaim};
use super::state::SessionState;
use crate::net::guard::GuardedClient;

/// Login entry point. Teardown navigates here with a full page load, which
/// also moots any callbacks still queued for in-flight requests.
pub const LOGIN_PATH: &str = "/login";

/// An at-most-once gate for side effects that racing callers may all
/// request. `arm` returns `true` for exactly one caller.
#[derive(Debug, Default)]
pub struct OnceLatch(AtomicBool);

impl OnceLatch {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Arm the latch. The first call returns `true`; every later call
    /// returns `false`.
    pub fn arm(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }
}

/// Begin the session lifecycle for this page load.
///
/// Safe to call from duplicate listeners: only the first call does
/// anything.
pub fn start(guard: &GuardedClient) {
    if !guard.start_latch().arm() {
        return;
    }

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(run(guard.clone()));
}

#[cfg(feature = "hydrate")]
async fn run(guard: GuardedClient) {
    use super::cookie;
    use crate::net::api::{self, VerifyOutcome};

    if on_login_page() {
        return;
    }

    let Some(token) = cookie::get(cookie::TOKEN_COOKIE) else {
        redirect_to_login();
        return;
    };

    guard.session().set(SessionState::Verifying);

    match api::verify_session().await {
        VerifyOutcome::Invalid => guard.teardown(),
        outcome => {
            if outcome == VerifyOutcome::Unknown {
                // Not a definite rejection; keep the session and let the
                // interceptor decide on the first real request.
                leptos::logging::warn!("session verify unreachable; continuing unverified");
            }

            let claim = resolved_claim(&token);
            if claim.is_admin {
                apply_admin_mode();
            }
            guard.session().set(SessionState::Authenticated(claim));
        }
    }
}

/// Decode the credential's claim, falling back to the unknown-claim
/// default. The verify endpoint has already accepted the session at this
/// point, and its answer outranks a claim that fails to decode.
pub(crate) fn resolved_claim(token: &str) -> IdentityClaim {
    claims::decode(token).unwrap_or_else(|| {
        leptos::logging::warn!("credential claim did not decode; treating claim as unknown");
        IdentityClaim::default()
    })
}

/// Invalidate the session and run teardown side effects at most once.
///
/// Every caller observes `Invalidated`; only the first one deletes the
/// cookie and navigates. Redundant calls from requests racing into an
/// authentication failure are no-ops.
pub fn teardown(session: RwSignal<SessionState>, latch: &OnceLatch) {
    session.set(SessionState::Invalidated);

    if latch.arm() {
        leptos::logging::log!("session invalidated; redirecting to login");
        #[cfg(feature = "hydrate")]
        {
            use super::cookie;

            cookie::delete(cookie::TOKEN_COOKIE);
            redirect_to_login();
        }
    }
}

#[cfg(feature = "hydrate")]
fn on_login_page() -> bool {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .is_some_and(|path| path == LOGIN_PATH)
}

/// Navigate to the login entry point with a full page load.
#[cfg(feature = "hydrate")]
pub fn redirect_to_login() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(LOGIN_PATH);
    }
}

/// Tag `<body>` so admin-only styling applies.
#[cfg(feature = "hydrate")]
fn apply_admin_mode() {
    if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let _ = body.class_list().add_1("admin-mode");
    }
}
