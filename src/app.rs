//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::nav::NavState;
use crate::net::guard::{GuardConfig, GuardedClient};
use crate::pages::{console::ConsolePage, login::LoginPage};
use crate::session::lifecycle;
use crate::session::state::SessionState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session and navigation state contexts plus the guarded
/// HTTP client, and starts the session lifecycle before any view can
/// issue a request.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    let nav = RwSignal::new(NavState::default());
    let guard = GuardedClient::new(session, GuardConfig::default());

    provide_context(session);
    provide_context(nav);
    provide_context(guard.clone());

    lifecycle::start(&guard);

    view! {
        <Stylesheet id="leptos" href="/pkg/console-rust.css"/>
        <Title text="Scheduler"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=ConsolePage/>
            </Routes>
        </Router>
    }
}
