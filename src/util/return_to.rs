//! Redirect targets and the "return-to" location carried through sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards decide *where* to go as plain data; this module turns that into
//! router navigation options. The carried location rides in history state so
//! it never shows up in the URL.

#[cfg(test)]
#[path = "return_to_test.rs"]
mod return_to_test;

use leptos_router::NavigateOptions;
use leptos_router::location::State;

/// Paths a return-to location may never point back into.
const AUTH_PAGES: [&str; 5] = ["/login", "/signup", "/password-recovery", "/reset-password", "/verify-email"];

/// A replace-navigation chosen by a guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectTarget {
    /// Destination path.
    pub path: String,
    /// Location the visitor was on, handed to the destination.
    pub from: Option<String>,
}

impl RedirectTarget {
    pub fn to(path: impl Into<String>) -> Self {
        Self { path: path.into(), from: None }
    }

    pub fn carrying(path: impl Into<String>, from: impl Into<String>) -> Self {
        Self { path: path.into(), from: Some(from.into()) }
    }

    /// Router options: always replace the current history entry.
    pub fn navigate_options(&self) -> NavigateOptions {
        NavigateOptions { replace: true, state: history_state(self.from.as_deref()), ..NavigateOptions::default() }
    }
}

/// Join a pathname and its query string into one requested location.
pub fn requested_location(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() { pathname.to_owned() } else { format!("{pathname}?{search}") }
}

/// Accept only same-origin absolute paths that do not lead back into the
/// auth pages.
pub fn sanitize_return_to(from: &str) -> Option<&str> {
    let from = from.trim();
    if !from.starts_with('/') || from.starts_with("//") || from.contains('\\') || from.contains(char::is_control) {
        return None;
    }
    let path = from.split(['?', '#']).next().unwrap_or(from);
    let into_auth = AUTH_PAGES
        .iter()
        .any(|page| path == *page || path.strip_prefix(page).is_some_and(|rest| rest.starts_with('/')));
    if into_auth { None } else { Some(from) }
}

/// Read a carried location out of router history state.
pub fn carried_location(state: &State) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        state.to_js_value().as_string()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = state;
        None
    }
}

fn history_state(from: Option<&str>) -> State {
    #[cfg(feature = "hydrate")]
    {
        State::new(from.map(wasm_bindgen::JsValue::from_str))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = from;
        State::default()
    }
}
