//! Role-gated navigation over the console's named sections.
//!
//! The decision is a pure function of the URL fragment and the current
//! role: it picks exactly one visible section and records a denial when a
//! non-admin asked for a restricted one. Rendering derives every DOM
//! effect (section visibility, sidebar, active tab, heading) from that
//! decision, so a restricted region is never even momentarily visible to
//! a non-admin.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

/// Named sections of the console.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Jobs,
    Executions,
    Logs,
    Users,
    Categories,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Jobs,
        Section::Executions,
        Section::Logs,
        Section::Users,
        Section::Categories,
    ];

    /// Resolve a URL fragment (with or without the leading `#`) to a
    /// section. Empty or unrecognized fragments land on the default.
    pub fn from_hash(hash: &str) -> Section {
        match hash.trim_start_matches('#') {
            "executions" => Section::Executions,
            "logs" => Section::Logs,
            "users" => Section::Users,
            "categories" => Section::Categories,
            _ => Section::Jobs,
        }
    }

    /// Fragment identifier for tab links.
    pub fn slug(self) -> &'static str {
        match self {
            Section::Jobs => "jobs",
            Section::Executions => "executions",
            Section::Logs => "logs",
            Section::Users => "users",
            Section::Categories => "categories",
        }
    }

    /// Heading shown above the section.
    pub fn display_name(self) -> &'static str {
        match self {
            Section::Jobs => "Jobs",
            Section::Executions => "Executions",
            Section::Logs => "Audit Logs",
            Section::Users => "Users",
            Section::Categories => "Categories",
        }
    }

    /// Sections only an admin claim may open.
    pub fn is_restricted(self) -> bool {
        matches!(self, Section::Users | Section::Categories)
    }

    /// Whether the section renders the filter sidebar.
    pub fn has_sidebar(self) -> bool {
        matches!(self, Section::Jobs | Section::Executions | Section::Logs)
    }

    /// Layout class for the main region: full width for the sidebar-less
    /// admin sections, offset columns otherwise.
    pub fn main_class(self) -> &'static str {
        if self.has_sidebar() {
            "col-sm-9 col-sm-offset-3 col-md-10 col-md-offset-2 main"
        } else {
            "col-sm-12 col-md-12 main"
        }
    }
}

/// Outcome of a navigation request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    /// The section that renders.
    pub active: Section,
    /// Set when a restricted section was refused; drives the blocking
    /// notice shown to the user.
    pub denied: Option<Section>,
}

/// Decide which section a fragment change may open for the current role.
///
/// Non-admins requesting a restricted section are sent to the default
/// section with the refusal recorded; the guard itself performs no
/// network calls and no DOM work.
pub fn resolve(hash: &str, is_admin: bool) -> NavState {
    let target = Section::from_hash(hash);

    if target.is_restricted() && !is_admin {
        return NavState { active: Section::default(), denied: Some(target) };
    }

    NavState { active: target, denied: None }
}

/// Current URL fragment, empty when there is none.
#[cfg(feature = "hydrate")]
pub fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}
