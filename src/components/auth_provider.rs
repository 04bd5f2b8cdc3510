//! Leptos component that mounts the session provider.

use std::sync::Arc;

use leptos::prelude::*;

use crate::net::identity::IdentityBackend;
use crate::state::provider::SessionProvider;
use crate::state::session::Session;

/// Owns the session for everything rendered inside it.
///
/// Provides a read-only `ReadSignal<Session>` context for `use_session`.
/// The provider is torn down with this component's owner.
#[component]
pub fn AuthProvider(backend: Arc<dyn IdentityBackend>, children: Children) -> impl IntoView {
    let session = RwSignal::new(Session::pending());
    provide_context(session.read_only());

    let (provider, check) = SessionProvider::mount(backend.as_ref(), session);

    // SSR renders the pending state; the browser runs the check after hydration.
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(check);
    #[cfg(not(feature = "hydrate"))]
    drop(check);

    on_cleanup(move || provider.teardown());

    children()
}
