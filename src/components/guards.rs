//! Route guards gated on the session's auth view.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ProtectedRoute` wraps the signed-in route tree, `GuestRoute` wraps single
//! pages meant only for signed-out visitors, and `RoleGate` narrows a section
//! to certain roles. Each guard is a pure decision over `AuthState` plus a
//! thin component that renders the decision and re-evaluates it whenever
//! the session changes.

#[cfg(test)]
#[path = "guards_test.rs"]
mod guards_test;

use leptos::prelude::*;
use leptos_router::components::{Outlet, Redirect};
use leptos_router::hooks::use_location;

use crate::config::{LANDING_PATH, LOGIN_PATH};
use crate::net::types::Role;
use crate::state::provider::use_session;
use crate::state::session::AuthState;
use crate::util::return_to::{RedirectTarget, requested_location};

/// What a guard renders for the current auth view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session check still outstanding.
    Checking,
    /// Leave via a history-replacing navigation.
    Redirect(RedirectTarget),
    /// Show the guarded content.
    Render,
}

/// Signed-in tree: wait, send to login with the requested location, or render.
pub fn protected_outcome(state: &AuthState, requested: &str) -> GuardOutcome {
    if state.loading {
        GuardOutcome::Checking
    } else if !state.is_authenticated {
        GuardOutcome::Redirect(RedirectTarget::carrying(LOGIN_PATH, requested))
    } else {
        GuardOutcome::Render
    }
}

/// Signed-out pages: wait, send signed-in users to the landing view, or render.
pub fn guest_outcome(state: &AuthState, current: &str) -> GuardOutcome {
    if state.loading {
        GuardOutcome::Checking
    } else if state.is_authenticated {
        GuardOutcome::Redirect(RedirectTarget::carrying(LANDING_PATH, current))
    } else {
        GuardOutcome::Render
    }
}

/// Section restricted to `allowed` roles; an empty list allows everyone.
///
/// Users holding another role are sent to their own role's home. Without a
/// user nothing renders; the enclosing `ProtectedRoute` handles that case.
pub fn role_outcome(state: &AuthState, allowed: &[Role]) -> GuardOutcome {
    if state.loading {
        return GuardOutcome::Checking;
    }
    let Some(user) = state.user.as_ref() else {
        return GuardOutcome::Checking;
    };
    if allowed.is_empty() || allowed.contains(&user.role) {
        GuardOutcome::Render
    } else {
        GuardOutcome::Redirect(RedirectTarget::to(user.role.home_path()))
    }
}

/// Full-screen placeholder shown while the session check is outstanding.
#[component]
pub fn AuthPending() -> impl IntoView {
    view! {
        <div class="auth-pending" role="status" aria-live="polite">
            <div class="auth-pending__spinner" aria-hidden="true"></div>
            <p class="auth-pending__label">"Checking authentication..."</p>
        </div>
    }
}

/// Render a guard outcome, with `content` for the pass-through branch.
pub(crate) fn render_outcome<F, V>(outcome: GuardOutcome, content: F) -> AnyView
where
    F: FnOnce() -> V,
    V: IntoView + 'static,
{
    match outcome {
        GuardOutcome::Checking => view! { <AuthPending/> }.into_any(),
        GuardOutcome::Redirect(target) => {
            let options = target.navigate_options();
            view! { <Redirect path=target.path options=options/> }.into_any()
        }
        GuardOutcome::Render => content().into_any(),
    }
}

/// Parent route for everything behind sign-in. Renders nested routes.
#[component]
pub fn ProtectedRoute() -> impl IntoView {
    let auth = use_session();
    let location = use_location();

    let outcome = Memo::new(move |_| {
        let requested = requested_location(&location.pathname.get(), &location.search.get());
        protected_outcome(&auth.get(), &requested)
    });

    move || render_outcome(outcome.get(), || view! { <Outlet/> })
}

/// Wrapper for a single page that signed-in users should not see.
#[component]
pub fn GuestRoute(children: ChildrenFn) -> impl IntoView {
    let auth = use_session();
    let location = use_location();

    let outcome = Memo::new(move |_| {
        let current = requested_location(&location.pathname.get(), &location.search.get());
        guest_outcome(&auth.get(), &current)
    });

    move || {
        let children = children.clone();
        render_outcome(outcome.get(), move || children())
    }
}

/// Wrapper restricting a section to the listed roles.
#[component]
pub fn RoleGate(#[prop(into)] allowed: Vec<Role>, children: ChildrenFn) -> impl IntoView {
    let auth = use_session();
    let outcome = Memo::new(move |_| role_outcome(&auth.get(), &allowed));

    move || {
        let children = children.clone();
        match outcome.get() {
            // The parent guard owns the waiting state; stay blank here.
            GuardOutcome::Checking => ().into_any(),
            other => render_outcome(other, move || children()),
        }
    }
}
