//! Landing page for the sign-up confirmation link.
//!
//! A `?token=` link is confirmed here; the service answers with a session,
//! and `AuthLayout` moves the now signed-in user on. Links the service has
//! already confirmed arrive with a fragment instead.

#[cfg(test)]
#[path = "verify_email_test.rs"]
mod verify_email_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::net::hosted::HostedIdentity;
use crate::util::link_params::link_param;

/// What the confirmation link asks of this page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum VerifyLink {
    /// Token still to be confirmed with the service.
    Token(String),
    /// The service confirmed the address before redirecting here.
    Confirmed,
    /// The service reported a problem with the link.
    Failed(String),
    /// Opened directly, without a link.
    Missing,
}

pub(crate) fn verify_link(search: &str, fragment: &str) -> VerifyLink {
    if let Some(token) = link_param(search, "token") {
        return VerifyLink::Token(token);
    }
    if let Some(reason) = link_param(fragment, "error_description").or_else(|| link_param(fragment, "error")) {
        return VerifyLink::Failed(reason);
    }
    if link_param(fragment, "access_token").is_some() {
        return VerifyLink::Confirmed;
    }
    VerifyLink::Missing
}

pub(crate) fn verify_message(link: &VerifyLink) -> String {
    match link {
        VerifyLink::Token(_) => "Verifying your email address...".to_owned(),
        VerifyLink::Confirmed => "Email verified. You can now sign in.".to_owned(),
        VerifyLink::Failed(reason) => format!("Verification failed: {reason}"),
        VerifyLink::Missing => "Check your email for a verification link.".to_owned(),
    }
}

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let identity = expect_context::<HostedIdentity>();
    let location = use_location();
    let link = verify_link(&location.search.get_untracked(), &location.hash.get_untracked());
    let message = RwSignal::new(verify_message(&link));

    #[cfg(feature = "hydrate")]
    {
        if let VerifyLink::Token(token) = link {
            leptos::task::spawn_local(async move {
                match identity.verify_email(&token).await {
                    Ok(_) => {
                        message.try_set("Email verified. Signing you in...".to_owned());
                    }
                    Err(e) => {
                        log::warn!("email verification failed [{}]: {e}", e.error_code());
                        message.try_set(verify_message(&VerifyLink::Failed(e.user_message())));
                    }
                }
            });
        }
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (identity, link);

    view! {
        <div class="auth-card">
            <h1>"Verify your email"</h1>
            <p class="auth-message">{move || message.get()}</p>
            <nav class="auth-links">
                <a href="/login">"Go to sign in"</a>
                <a href="/signup">"Create an account"</a>
            </nav>
        </div>
    }
}
