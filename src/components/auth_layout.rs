//! Shared layout for the sign-in, sign-up and recovery pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only guard over the auth pages. Once a user is known it sends
//! them on, to the location they first asked for when one was
//! carried to the login page, otherwise to the landing view. The pages
//! themselves never navigate after signing in.

#[cfg(test)]
#[path = "auth_layout_test.rs"]
mod auth_layout_test;

use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_location;

use super::guards::{GuardOutcome, render_outcome};
use crate::config::LANDING_PATH;
use crate::state::provider::use_session;
use crate::state::session::AuthState;
use crate::util::return_to::{RedirectTarget, carried_location, sanitize_return_to};

/// Leave once a user is known and the check is over; otherwise render the
/// page, including while the check is still running.
pub fn layout_outcome(state: &AuthState, carried: Option<&str>) -> GuardOutcome {
    if state.user.is_some() && !state.loading {
        let path = carried.and_then(sanitize_return_to).unwrap_or(LANDING_PATH);
        GuardOutcome::Redirect(RedirectTarget::to(path))
    } else {
        GuardOutcome::Render
    }
}

/// Centered single-column shell around the nested auth page.
#[component]
pub fn AuthLayout() -> impl IntoView {
    let auth = use_session();
    let location = use_location();

    let outcome = Memo::new(move |_| {
        let carried = carried_location(&location.state.get());
        layout_outcome(&auth.get(), carried.as_deref())
    });

    move || {
        render_outcome(outcome.get(), || {
            view! {
                <div class="auth-layout">
                    <div class="auth-layout__column">
                        <Outlet/>
                    </div>
                </div>
            }
        })
    }
}
