//! Signed-in dashboard: home, section placeholders, sign-out.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything here renders under `ProtectedRoute`, so the session always
//! holds a user by the time these components run. Role-restricted sections
//! are wrapped in `RoleGate` at the route table.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::net::hosted::HostedIdentity;
use crate::net::types::Role;
use crate::state::provider::use_session;

/// A navigable dashboard section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub slug: &'static str,
    pub title: &'static str,
}

pub const SECTIONS: &[Section] = &[
    Section { slug: "tasks", title: "Tasks" },
    Section { slug: "clients", title: "Clients" },
    Section { slug: "hr", title: "People" },
    Section { slug: "finance", title: "Finance" },
    Section { slug: "reports", title: "Reports" },
    Section { slug: "docs", title: "Documents" },
];

/// Roles allowed into the HR section.
pub fn hr_roles() -> Vec<Role> {
    vec![Role::Admin, Role::Hr]
}

/// Roles allowed into the finance section.
pub fn finance_roles() -> Vec<Role> {
    vec![Role::Admin, Role::Finance]
}

/// Sections whose link should be offered to `role`.
pub fn visible_sections(role: Option<&Role>) -> Vec<Section> {
    SECTIONS
        .iter()
        .filter(|section| {
            let allowed = match section.slug {
                "hr" => hr_roles(),
                "finance" => finance_roles(),
                _ => return true,
            };
            role.is_some_and(|r| allowed.contains(r))
        })
        .copied()
        .collect()
}

pub fn section_href(section: &Section) -> String {
    format!("/dashboard/{}", section.slug)
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_session();

    let greeting = move || {
        auth.get().user.map_or_else(String::new, |user| format!("Welcome back, {}", user.name))
    };
    let role_label = move || auth.get().role().map_or_else(String::new, ToString::to_string);
    let links = move || {
        let state = auth.get();
        visible_sections(state.role())
            .into_iter()
            .map(|section| {
                view! {
                    <li class="dashboard__section-link">
                        <a href=section_href(&section)>{section.title}</a>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard__header">
                <h1>{greeting}</h1>
                <span class="dashboard__role">{role_label}</span>
                <SignOutButton/>
            </header>
            <ul class="dashboard__sections">{links}</ul>
        </div>
    }
}

/// Placeholder body for a dashboard section.
#[component]
pub fn SectionPage(title: &'static str) -> impl IntoView {
    view! {
        <div class="dashboard-page">
            <header class="dashboard__header">
                <a class="dashboard__back" href="/dashboard">"Dashboard"</a>
                <h1>{title}</h1>
                <SignOutButton/>
            </header>
            <p class="dashboard__empty">"Nothing here yet."</p>
        </div>
    }
}

/// Ends the session. `ProtectedRoute` sends the browser to login once the
/// sign-out notification clears the user.
#[component]
pub fn SignOutButton() -> impl IntoView {
    let identity = expect_context::<HostedIdentity>();
    let busy = RwSignal::new(false);

    let on_click = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let identity = identity.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = identity.sign_out().await {
                    log::warn!("sign-out call failed [{}]: {e}", e.error_code());
                }
                busy.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &identity;
        }
    };

    view! {
        <button class="dashboard__sign-out" on:click=on_click disabled=move || busy.get()>
            "Sign out"
        </button>
    }
}
