//! New-password page reached from an emailed recovery link.
//!
//! The link carries a short-lived recovery token in its fragment. The token
//! is used for the one password update and never stored, so the visitor
//! stays signed out and signs in with the new password afterwards.

#[cfg(test)]
#[path = "reset_password_test.rs"]
mod reset_password_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::net::hosted::HostedIdentity;
use crate::util::link_params::link_param;

pub(crate) const MIN_PASSWORD_LEN: usize = 8;

/// Recovery token from a `#access_token=...&type=recovery` fragment.
pub(crate) fn recovery_token(fragment: &str) -> Option<String> {
    if link_param(fragment, "type").as_deref() != Some("recovery") {
        return None;
    }
    link_param(fragment, "access_token")
}

pub(crate) fn validate_new_password(password: &str, confirm: &str) -> Result<String, &'static str> {
    if password.is_empty() {
        return Err("Enter a new password.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(password.to_owned())
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let identity = expect_context::<HostedIdentity>();
    let location = use_location();
    let token = Memo::new(move |_| recovery_token(&location.hash.get()));

    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let done = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() || done.get() {
            return;
        }
        let Some(token_value) = token.get() else {
            info.set("This reset link is invalid or has expired.".to_owned());
            return;
        };
        let password_value = match validate_new_password(&password.get(), &confirm.get()) {
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
            leptos::task::spawn_local(async move {
                match identity.update_password(&token_value, &password_value).await {
                    Ok(()) => {
                        log::info!("password updated from recovery link");
                        done.set(true);
                        info.set("Password updated. You can now sign in.".to_owned());
                    }
                    Err(e) => {
                        log::warn!("password update failed [{}]: {e}", e.error_code());
                        info.set(e.user_message());
                    }
                }
                password.set(String::new());
                confirm.set(String::new());
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&identity, token_value, password_value);
        }
    };

    view! {
        <div class="auth-card">
            <h1>"Choose a new password"</h1>
            <p class="auth-message" hidden=move || token.get().is_some()>
                "This reset link is invalid or has expired."
            </p>
            <form
                class=move || if done.get() { "auth-form auth-form--done" } else { "auth-form" }
                hidden=move || token.get().is_none()
                on:submit=on_submit
            >
                <input
                    class="auth-input"
                    type="password"
                    placeholder="New password"
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Confirm new password"
                    autocomplete="new-password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <button class="auth-button" type="submit" disabled=move || busy.get() || done.get()>
                    "Update password"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="auth-message">{move || info.get()}</p>
            </Show>
            <nav class="auth-links">
                <a href="/login">"Back to sign in"</a>
                <a href="/password-recovery">"Send a new link"</a>
            </nav>
        </div>
    }
}
