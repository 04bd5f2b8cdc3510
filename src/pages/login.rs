//! Email + password sign-in page.
//!
//! A successful sign-in only updates the session (through the backend's
//! change notification); `AuthLayout` performs the navigation away.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::net::hosted::HostedIdentity;

/// Shown in place of the form's feedback when no identity service is set up.
pub(crate) const UNCONFIGURED_NOTICE: &str = "Sign-in is not available right now.";

pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let identity = expect_context::<HostedIdentity>();
    let configured = identity.is_configured();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(if configured { String::new() } else { UNCONFIGURED_NOTICE.to_owned() });
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() || !configured {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let identity = identity.clone();
            leptos::task::spawn_local(async move {
                match identity.sign_in_with_password(&email_value, &password_value).await {
                    Ok(_) => info.set(String::new()),
                    Err(e) => {
                        log::warn!("sign-in failed [{}]: {e}", e.error_code());
                        info.set(e.user_message());
                        password.set(String::new());
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&identity, email_value, password_value);
        }
    };

    view! {
        <div class="auth-card">
            <h1>"Sign in"</h1>
            <form class="auth-form" on:submit=on_submit>
                <input
                    class="auth-input"
                    type="email"
                    placeholder="you@example.com"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="auth-button" type="submit" disabled=move || busy.get() || !configured>
                    "Sign in"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="auth-message">{move || info.get()}</p>
            </Show>
            <nav class="auth-links">
                <a href="/password-recovery">"Forgot password?"</a>
                <a href="/signup">"Create an account"</a>
            </nav>
        </div>
    }
}
