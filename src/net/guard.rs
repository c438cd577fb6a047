//! Guarded HTTP client: every request the console issues goes through
//! here so authentication failures are caught regardless of call site.
//!
//! A direct 401 tears the session down immediately. A 5xx or a transport
//! failure is ambiguous, since backing-store timeouts surface as 500 yet
//! often mean the session died server-side; one round trip to the verify
//! endpoint decides between "real error, propagate" and "hidden auth
//! failure, tear down". The probe uses the plain client, never this one,
//! so a failing probe cannot recurse.
//!
//! The client is an explicit value constructed once at startup and handed
//! to call sites through Leptos context; nothing global is patched.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;

#[cfg(feature = "hydrate")]
use leptos::prelude::GetUntracked;
use leptos::prelude::RwSignal;

use crate::net::api::VerifyOutcome;
use crate::session::lifecycle::{self, OnceLatch};
use crate::session::state::SessionState;

/// Per-request classification. Only `AuthFailure` invalidates the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterceptOutcome {
    Ok,
    AuthFailure,
    OtherError,
}

/// Interceptor tuning.
#[derive(Clone, Debug)]
pub struct GuardConfig {
    /// Probe the verify endpoint on ambiguous 5xx/transport errors. Costs
    /// one extra round trip per ambiguous error when enabled.
    pub probe_ambiguous: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self { probe_ambiguous: true }
    }
}

/// Error surfaced to a request's caller. Auth failures arrive here too so
/// callers can observe them, but teardown and the redirect have already
/// been handled; no call site implements its own.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ApiError {
    #[error("session is no longer authenticated")]
    Unauthorized,
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("not available on the server")]
    Unavailable,
}

/// HTTP client wrapper holding the session signal, the teardown latch,
/// and the interceptor configuration. Cheap to clone; all clones share
/// the same latches.
#[derive(Clone)]
pub struct GuardedClient {
    session: RwSignal<SessionState>,
    config: GuardConfig,
    torn_down: Arc<OnceLatch>,
    started: Arc<OnceLatch>,
}

impl GuardedClient {
    pub fn new(session: RwSignal<SessionState>, config: GuardConfig) -> Self {
        Self {
            session,
            config,
            torn_down: Arc::new(OnceLatch::new()),
            started: Arc::new(OnceLatch::new()),
        }
    }

    pub fn session(&self) -> RwSignal<SessionState> {
        self.session
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Latch guarding the once-per-page-load lifecycle start.
    pub fn start_latch(&self) -> &OnceLatch {
        &self.started
    }

    /// Invalidate the session and run teardown side effects at most once.
    pub fn teardown(&self) {
        lifecycle::teardown(self.session, &self.torn_down);
    }
}

/// First look at a request's result, before any secondary probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FirstPass {
    /// 2xx: hand the response through untouched.
    Pass,
    /// Definite authentication failure (401).
    Reject,
    /// 5xx or no status at all; needs the secondary check.
    Ambiguous,
    /// Any other status: an ordinary error, no probe.
    Error,
}

pub(crate) fn first_pass(status: Option<u16>) -> FirstPass {
    match status {
        Some(401) => FirstPass::Reject,
        Some(500..=599) | None => FirstPass::Ambiguous,
        Some(200..=299) => FirstPass::Pass,
        Some(_) => FirstPass::Error,
    }
}

/// Decide an ambiguous result from the secondary probe's answer. Only a
/// definite `Invalid` converts the original error into an auth failure;
/// an unreachable or healthy verify endpoint lets it propagate as-is.
pub(crate) fn resolve_ambiguous(probe: Option<VerifyOutcome>) -> InterceptOutcome {
    match probe {
        Some(VerifyOutcome::Invalid) => InterceptOutcome::AuthFailure,
        _ => InterceptOutcome::OtherError,
    }
}

#[cfg(feature = "hydrate")]
impl GuardedClient {
    /// GET a JSON body.
    pub async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let request = gloo_net::http::Request::get(url)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = self.dispatch(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// POST a JSON body, ignoring the response payload.
    pub async fn post_json<B: serde::Serialize>(&self, url: &str, body: &B) -> Result<(), ApiError> {
        let request = gloo_net::http::Request::post(url)
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.dispatch(request).await.map(|_| ())
    }

    /// PUT a JSON body, ignoring the response payload.
    pub async fn put_json<B: serde::Serialize>(&self, url: &str, body: &B) -> Result<(), ApiError> {
        let request = gloo_net::http::Request::put(url)
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.dispatch(request).await.map(|_| ())
    }

    /// DELETE a resource.
    pub async fn delete(&self, url: &str) -> Result<(), ApiError> {
        let request = gloo_net::http::Request::delete(url)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.dispatch(request).await.map(|_| ())
    }

    /// Send one request through the interceptor.
    async fn dispatch(
        &self,
        request: gloo_net::http::Request,
    ) -> Result<gloo_net::http::Response, ApiError> {
        // The page is already navigating to login; nothing issued after
        // invalidation may reach the network or re-render stale content.
        if self.session.get_untracked().is_invalidated() {
            return Err(ApiError::Unauthorized);
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status();
                match self.intercept(Some(status)).await {
                    InterceptOutcome::Ok => Ok(response),
                    InterceptOutcome::AuthFailure => {
                        self.teardown();
                        Err(ApiError::Unauthorized)
                    }
                    InterceptOutcome::OtherError => Err(ApiError::Status(status)),
                }
            }
            Err(err) => match self.intercept(None).await {
                InterceptOutcome::AuthFailure => {
                    self.teardown();
                    Err(ApiError::Unauthorized)
                }
                _ => Err(ApiError::Network(err.to_string())),
            },
        }
    }

    async fn intercept(&self, status: Option<u16>) -> InterceptOutcome {
        match first_pass(status) {
            FirstPass::Pass => InterceptOutcome::Ok,
            FirstPass::Reject => {
                leptos::logging::warn!("request rejected with 401; tearing session down");
                InterceptOutcome::AuthFailure
            }
            FirstPass::Error => InterceptOutcome::OtherError,
            FirstPass::Ambiguous => {
                let probe = if self.config.probe_ambiguous {
                    Some(crate::net::api::verify_session().await)
                } else {
                    None
                };
                let outcome = resolve_ambiguous(probe);
                if outcome == InterceptOutcome::AuthFailure {
                    leptos::logging::warn!("ambiguous error confirmed as dead session");
                }
                outcome
            }
        }
    }
}
