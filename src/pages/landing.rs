//! Public landing page for signed-out visitors.

use leptos::prelude::*;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing">
            <header class="landing__hero">
                <h1>"Company Portal"</h1>
                <p>"Tasks, clients, people and reports in one place."</p>
            </header>
            <nav class="landing__actions">
                <a class="auth-button" href="/login">"Sign in"</a>
                <a class="landing__secondary" href="/signup">"Create an account"</a>
            </nav>
        </div>
    }
}
