//! Login page. The session guard is inactive here; a successful login
//! reloads into the console and the server sets the cookie itself.

use leptos::prelude::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        #[cfg(feature = "hydrate")]
        {
            let user = username.get_untracked();
            let pass = password.get_untracked();
            if user.is_empty() || pass.is_empty() {
                error.set(Some("Username and password are required.".to_owned()));
                return;
            }

            leptos::task::spawn_local(async move {
                match crate::net::api::login(&user, &pass).await {
                    Ok(()) => {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("/");
                        }
                    }
                    Err(message) => error.set(Some(message)),
                }
            });
        }
    };

    view! {
        <div class="login-page">
            <h1>"Scheduler"</h1>
            <p>"Sign in to manage jobs"</p>

            <form class="login-form" on:submit=submit>
                <label class="login-form__label">
                    "Username"
                    <input
                        type="text"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </label>
                <label class="login-form__label">
                    "Password"
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>

                <Show when=move || error.get().is_some()>
                    <p class="text-danger">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <button type="submit" class="btn btn--primary">
                    "Sign in"
                </button>
            </form>
        </div>
    }
}
