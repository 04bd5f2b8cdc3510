//! Account sign-up page.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;

use crate::net::hosted::HostedIdentity;

/// Trimmed name and email plus the password, once every field checks out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Where the confirmation email sends the new user.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn verify_redirect(origin: &str) -> String {
    format!("{}/verify-email", origin.trim_end_matches('/'))
}

pub(crate) fn validate_signup_input(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<SignupInput, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Fill in every field.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(SignupInput { name: name.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let identity = expect_context::<HostedIdentity>();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let done = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let input = match validate_signup_input(&name.get(), &email.get(), &password.get(), &confirm.get()) {
            Ok(input) => input,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let identity = identity.clone();
            let origin = web_sys::window().and_then(|w| w.location().origin().ok()).unwrap_or_default();
            leptos::task::spawn_local(async move {
                match identity.sign_up(&input.name, &input.email, &input.password, &verify_redirect(&origin)).await {
                    Ok(()) => {
                        done.set(true);
                        info.set("Account created. Check your email to verify it, then sign in.".to_owned());
                    }
                    Err(e) => {
                        log::warn!("sign-up failed [{}]: {e}", e.error_code());
                        info.set(e.user_message());
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&identity, input);
        }
    };

    view! {
        <div class="auth-card">
            <h1>"Create an account"</h1>
            <form
                class=move || if done.get() { "auth-form auth-form--done" } else { "auth-form" }
                on:submit=on_submit
            >
                <input
                    class="auth-input"
                    type="text"
                    placeholder="Full name"
                    autocomplete="name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
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
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Confirm password"
                    autocomplete="new-password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    "Sign up"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="auth-message">{move || info.get()}</p>
            </Show>
            <nav class="auth-links">
                <a href="/login">"Already have an account? Sign in"</a>
            </nav>
        </div>
    }
}
