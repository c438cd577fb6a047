//! # console-rust
//!
//! Leptos + WASM admin console for the job scheduler. Replaces the
//! Backbone.js console with a Rust-native UI layer.
//!
//! The crate's core is the session guard: a cookie-backed credential
//! store, a tolerant claim decoder, an authoritative verify round trip,
//! a guarded HTTP client that intercepts authentication failures on
//! every request, and a role-gated navigation guard over the console's
//! sections. Section views themselves are thin.

pub mod app;
pub mod components;
pub mod nav;
pub mod net;
pub mod pages;
pub mod session;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    leptos::mount::hydrate_body(App);
}
