//! Top navigation bar: section tabs, user badge, logout.

use leptos::prelude::*;

use crate::nav::{NavState, Section};
use crate::session::state::SessionState;

/// Navigation bar. Restricted tabs render only for admin claims, the
/// title carries the signed-in username, and logout tears the credential
/// down with a full page load.
#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let nav_state = expect_context::<RwSignal<NavState>>();

    let title = move || {
        let username = session.get().username().to_owned();
        if username.is_empty() {
            "Scheduler".to_owned()
        } else {
            format!("Scheduler@{username}")
        }
    };

    let logout = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        #[cfg(feature = "hydrate")]
        {
            use crate::session::cookie::{self, TOKEN_COOKIE};
            use crate::session::lifecycle;

            cookie::delete(TOKEN_COOKIE);
            lifecycle::redirect_to_login();
        }
    };

    view! {
        <nav class="navbar navbar-inverse navbar-fixed-top">
            <div class="navbar-header">
                <a class="navbar-brand" href="#jobs" id="website-title">
                    {title}
                </a>
            </div>

            <ul class="nav navbar-nav">
                {Section::ALL
                    .into_iter()
                    .map(|section| {
                        view! {
                            <Show when=move || {
                                !section.is_restricted() || session.get().is_admin()
                            }>
                                <li
                                    id=format!("{}-tab", section.slug())
                                    class:active=move || nav_state.get().active == section
                                >
                                    <a href=format!("#{}", section.slug())>
                                        {section.display_name()}
                                    </a>
                                </li>
                            </Show>
                        }
                    })
                    .collect::<Vec<_>>()}
            </ul>

            <ul class="nav navbar-nav navbar-right">
                <li>
                    <a href="/login" id="logout-btn" on:click=logout>
                        "Logout"
                    </a>
                </li>
            </ul>
        </nav>
    }
}
