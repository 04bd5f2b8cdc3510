//! Password recovery request page.

#[cfg(test)]
#[path = "password_recovery_test.rs"]
mod password_recovery_test;

use leptos::prelude::*;

use crate::net::hosted::HostedIdentity;

/// Where the emailed reset link sends the user to choose a new password.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn reset_redirect(origin: &str) -> String {
    format!("{}/reset-password", origin.trim_end_matches('/'))
}

pub(crate) fn validate_recovery_input(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Enter your email first.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(email.to_owned())
}

#[component]
pub fn PasswordRecoveryPage() -> impl IntoView {
    let identity = expect_context::<HostedIdentity>();
    let email = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = match validate_recovery_input(&email.get()) {
            Ok(value) => value,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let identity = identity.clone();
            let origin = web_sys::window().and_then(|w| w.location().origin().ok()).unwrap_or_default();
            leptos::task::spawn_local(async move {
                match identity.request_password_reset(&email_value, &reset_redirect(&origin)).await {
                    Ok(()) => info.set("Reset instructions sent. Check your email.".to_owned()),
                    Err(e) => {
                        log::warn!("password reset request failed [{}]: {e}", e.error_code());
                        info.set("Could not send reset instructions.".to_owned());
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&identity, email_value);
        }
    };

    view! {
        <div class="auth-card">
            <h1>"Reset your password"</h1>
            <form class="auth-form" on:submit=on_submit>
                <input
                    class="auth-input"
                    type="email"
                    placeholder="you@example.com"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    "Send reset link"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="auth-message">{move || info.get()}</p>
            </Show>
            <nav class="auth-links">
                <a href="/login">"Back to sign in"</a>
            </nav>
        </div>
    }
}
