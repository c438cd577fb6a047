//! Console shell: navbar, heading, sidebar, and the five section regions.
//!
//! Visibility is derived entirely from the [`NavState`] signal, so which
//! region renders is decided by `nav::resolve` and nowhere else. Section
//! views are thin list renderings; they fetch through the guarded client
//! from context, and only once their section is the visible one.

use leptos::prelude::*;

use crate::components::navbar::Navbar;
use crate::nav::{NavState, Section};
use crate::net::api;
use crate::net::guard::{ApiError, GuardedClient};

/// Main console page. Follows the URL fragment and the current role.
#[component]
pub fn ConsolePage() -> impl IntoView {
    let nav_state = expect_context::<RwSignal<NavState>>();

    #[cfg(feature = "hydrate")]
    {
        use crate::nav;
        use crate::session::state::SessionState;

        let session = expect_context::<RwSignal<SessionState>>();
        let resolve_current = move || {
            let is_admin = session.get_untracked().is_admin();
            nav_state.set(nav::resolve(&nav::current_hash(), is_admin));
        };

        // Re-resolve when the session settles (the admin tabs may only
        // open after the claim arrives) and on every fragment change.
        Effect::new(move || {
            session.track();
            resolve_current();
        });
        window_event_listener(leptos::ev::hashchange, move |_| resolve_current());
    }

    let active = move || nav_state.get().active;
    let denied = move || nav_state.get().denied;

    view! {
        <div class="console-page">
            <Navbar/>

            <div class="container-fluid">
                <div class="row">
                    <Show when=move || active().has_sidebar()>
                        <div class="sidebar">
                            <SectionSidebar/>
                        </div>
                    </Show>

                    <div class=move || active().main_class()>
                        <h1 class="sub-header">{move || active().display_name()}</h1>

                        <Show when=move || denied().is_some()>
                            <div class="alert alert-warning" role="alert">
                                {move || {
                                    denied().map_or(String::new(), |section| {
                                        format!(
                                            "Administrator access is required for {}.",
                                            section.display_name()
                                        )
                                    })
                                }}
                            </div>
                        </Show>

                        <SectionRegion section=Section::Jobs>
                            <JobsSection/>
                        </SectionRegion>
                        <SectionRegion section=Section::Executions>
                            <ExecutionsSection/>
                        </SectionRegion>
                        <SectionRegion section=Section::Logs>
                            <LogsSection/>
                        </SectionRegion>
                        <SectionRegion section=Section::Users>
                            <UsersSection/>
                        </SectionRegion>
                        <SectionRegion section=Section::Categories>
                            <CategoriesSection/>
                        </SectionRegion>
                    </div>
                </div>
            </div>
        </div>
    }
}

/// One section's container. Exactly one region is displayed at a time;
/// all others stay hidden.
#[component]
fn SectionRegion(section: Section, children: ChildrenFn) -> impl IntoView {
    let nav_state = expect_context::<RwSignal<NavState>>();

    view! {
        <div
            id=format!("{}-page-content", section.slug())
            style:display=move || {
                if nav_state.get().active == section { "block" } else { "none" }
            }
        >
            {children()}
        </div>
    }
}

/// Filter sidebar shown for the operational sections.
#[component]
fn SectionSidebar() -> impl IntoView {
    let nav_state = expect_context::<RwSignal<NavState>>();

    view! {
        <div id=move || format!("{}-page-sidebar", nav_state.get().active.slug())>
            <ul class="nav nav-sidebar">
                <li>
                    <a href=move || format!("#{}", nav_state.get().active.slug())>"Refresh"</a>
                </li>
            </ul>
        </div>
    }
}

/// Fetch a section's list once that section is the visible one. Hidden
/// sections resolve to an empty list without touching the network, so a
/// refused restricted section never issues its data call.
fn section_resource<T, Fut>(
    section: Section,
    fetch: impl Fn(GuardedClient) -> Fut + 'static,
) -> LocalResource<Result<Vec<T>, ApiError>>
where
    T: Clone + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let client = expect_context::<GuardedClient>();
    let nav_state = expect_context::<RwSignal<NavState>>();

    LocalResource::new(move || {
        let visible = nav_state.get().active == section;
        let request = visible.then(|| fetch(client.clone()));
        async move {
            match request {
                Some(request) => request.await,
                None => Ok(Vec::new()),
            }
        }
    })
}

#[component]
fn JobsSection() -> impl IntoView {
    let jobs = section_resource(Section::Jobs, |client| async move {
        api::fetch_jobs(&client).await
    });

    view! {
        <Suspense fallback=move || view! { <p>"Loading jobs..."</p> }>
            {move || {
                jobs.get().map(|result| match result {
                    Ok(list) => {
                        view! {
                            <table class="table table-striped">
                                <thead>
                                    <tr>
                                        <th>"Name"</th>
                                        <th>"Task"</th>
                                        <th>"Next Run"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list
                                        .into_iter()
                                        .map(|job| {
                                            view! {
                                                <tr>
                                                    <td>{job.name}</td>
                                                    <td>{job.task_name}</td>
                                                    <td>{job.next_run_time}</td>
                                                </tr>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </tbody>
                            </table>
                        }
                            .into_any()
                    }
                    Err(err) => view! { <p class="text-danger">{err.to_string()}</p> }.into_any(),
                })
            }}
        </Suspense>
    }
}

#[component]
fn ExecutionsSection() -> impl IntoView {
    let executions = section_resource(Section::Executions, |client| async move {
        api::fetch_executions(&client).await
    });

    view! {
        <Suspense fallback=move || view! { <p>"Loading executions..."</p> }>
            {move || {
                executions.get().map(|result| match result {
                    Ok(list) => {
                        view! {
                            <table class="table table-striped">
                                <thead>
                                    <tr>
                                        <th>"Execution"</th>
                                        <th>"State"</th>
                                        <th>"Scheduled"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list
                                        .into_iter()
                                        .map(|execution| {
                                            view! {
                                                <tr>
                                                    <td>{execution.execution_id}</td>
                                                    <td>{execution.state}</td>
                                                    <td>{execution.scheduled_time}</td>
                                                </tr>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </tbody>
                            </table>
                        }
                            .into_any()
                    }
                    Err(err) => view! { <p class="text-danger">{err.to_string()}</p> }.into_any(),
                })
            }}
        </Suspense>
    }
}

#[component]
fn LogsSection() -> impl IntoView {
    let logs = section_resource(Section::Logs, |client| async move {
        api::fetch_audit_logs(&client).await
    });

    view! {
        <Suspense fallback=move || view! { <p>"Loading audit logs..."</p> }>
            {move || {
                logs.get().map(|result| match result {
                    Ok(list) => {
                        view! {
                            <table class="table table-striped">
                                <thead>
                                    <tr>
                                        <th>"Job"</th>
                                        <th>"Event"</th>
                                        <th>"User"</th>
                                        <th>"Time"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list
                                        .into_iter()
                                        .map(|log| {
                                            view! {
                                                <tr>
                                                    <td>{log.job_name}</td>
                                                    <td>{log.event}</td>
                                                    <td>{log.user}</td>
                                                    <td>{log.created_time}</td>
                                                </tr>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </tbody>
                            </table>
                        }
                            .into_any()
                    }
                    Err(err) => view! { <p class="text-danger">{err.to_string()}</p> }.into_any(),
                })
            }}
        </Suspense>
    }
}

#[component]
fn UsersSection() -> impl IntoView {
    let users = section_resource(Section::Users, |client| async move {
        api::fetch_users(&client).await
    });

    view! {
        <Suspense fallback=move || view! { <p>"Loading users..."</p> }>
            {move || {
                users.get().map(|result| match result {
                    Ok(list) => {
                        view! {
                            <table class="table table-striped">
                                <thead>
                                    <tr>
                                        <th>"Username"</th>
                                        <th>"Role"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list
                                        .into_iter()
                                        .map(|user| {
                                            view! {
                                                <tr>
                                                    <td>{user.username}</td>
                                                    <td>{if user.is_admin { "Admin" } else { "User" }}</td>
                                                </tr>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </tbody>
                            </table>
                        }
                            .into_any()
                    }
                    Err(err) => view! { <p class="text-danger">{err.to_string()}</p> }.into_any(),
                })
            }}
        </Suspense>
    }
}

#[component]
fn CategoriesSection() -> impl IntoView {
    let categories = section_resource(Section::Categories, |client| async move {
        api::fetch_categories(&client).await
    });

    view! {
        <Suspense fallback=move || view! { <p>"Loading categories..."</p> }>
            {move || {
                categories.get().map(|result| match result {
                    Ok(list) => {
                        view! {
                            <table class="table table-striped">
                                <thead>
                                    <tr>
                                        <th>"Name"</th>
                                        <th>"Description"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list
                                        .into_iter()
                                        .map(|category| {
                                            view! {
                                                <tr>
                                                    <td>{category.name}</td>
                                                    <td>{category.description}</td>
                                                </tr>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </tbody>
                            </table>
                        }
                            .into_any()
                    }
                    Err(err) => view! { <p class="text-danger">{err.to_string()}</p> }.into_any(),
                })
            }}
        </Suspense>
    }
}
