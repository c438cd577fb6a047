//! Session state for the current page load.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use super::claims::IdentityClaim;

/// Where the current page load stands with the session.
///
/// Starts `Unauthenticated`, moves to `Verifying` once a credential is
/// found, and to `Authenticated` when the verify endpoint accepts it.
/// `Invalidated` is terminal for the page instance: it is entered the
/// moment any intercepted request signals an authentication failure, and
/// always coincides with teardown. Only the lifecycle controller and the
/// request interceptor write this state; everything else reads it.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Verifying,
    Authenticated(IdentityClaim),
    Invalidated,
}

impl SessionState {
    /// The decoded claim, when authenticated.
    pub fn claim(&self) -> Option<&IdentityClaim> {
        match self {
            SessionState::Authenticated(claim) => Some(claim),
            _ => None,
        }
    }

    /// Whether the current claim asserts the admin role.
    pub fn is_admin(&self) -> bool {
        self.claim().is_some_and(|c| c.is_admin)
    }

    /// Username from the current claim, empty when there is none.
    pub fn username(&self) -> &str {
        self.claim().map_or("", |c| c.username.as_str())
    }

    pub fn is_invalidated(&self) -> bool {
        matches!(self, SessionState::Invalidated)
    }
}
