//! Session guard: credential storage, claim decoding, and lifecycle.
//!
//! DESIGN
//! ======
//! The credential is advisory until the verify endpoint has accepted it;
//! after that, the request interceptor in `net::guard` is the only thing
//! that can invalidate the session. Pure decision logic lives ungated so
//! it is testable off the browser; `document`/`window` access is gated
//! behind the `hydrate` feature.

pub mod claims;
pub mod cookie;
pub mod lifecycle;
pub mod state;
