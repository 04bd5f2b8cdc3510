//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
};

use crate::components::auth_layout::AuthLayout;
use crate::components::auth_provider::AuthProvider;
use crate::components::guards::{GuestRoute, ProtectedRoute, RoleGate};
use crate::net::hosted::HostedIdentity;
use crate::pages::dashboard::{DashboardPage, SectionPage, finance_roles, hr_roles};
use crate::pages::{
    landing::LandingPage, login::LoginPage, password_recovery::PasswordRecoveryPage, reset_password::ResetPasswordPage,
    signup::SignupPage, verify_email::VerifyEmailPage,
};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the identity handle, mounts the session provider, and sets up
/// client-side routing with the guards in place.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let identity = HostedIdentity::from_build_env();
    provide_context(identity.clone());

    view! {
        <Stylesheet id="leptos" href="/pkg/portal.css"/>
        <Title text="Portal"/>

        <AuthProvider backend=Arc::new(identity)>
            <Router>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=|| view! { <GuestRoute><LandingPage/></GuestRoute> }/>
                    <ParentRoute path=StaticSegment("") view=AuthLayout>
                        <Route path=StaticSegment("login") view=LoginPage/>
                        <Route path=StaticSegment("signup") view=SignupPage/>
                        <Route path=StaticSegment("password-recovery") view=PasswordRecoveryPage/>
                        <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>
                        <Route path=StaticSegment("verify-email") view=VerifyEmailPage/>
                    </ParentRoute>
                    <ParentRoute path=StaticSegment("dashboard") view=ProtectedRoute>
                        <Route path=StaticSegment("") view=DashboardPage/>
                        <Route path=StaticSegment("tasks") view=|| view! { <SectionPage title="Tasks"/> }/>
                        <Route path=StaticSegment("clients") view=|| view! { <SectionPage title="Clients"/> }/>
                        <Route
                            path=StaticSegment("hr")
                            view=|| view! { <RoleGate allowed=hr_roles()><SectionPage title="People"/></RoleGate> }
                        />
                        <Route
                            path=StaticSegment("finance")
                            view=|| view! { <RoleGate allowed=finance_roles()><SectionPage title="Finance"/></RoleGate> }
                        />
                        <Route path=StaticSegment("reports") view=|| view! { <SectionPage title="Reports"/> }/>
                        <Route path=StaticSegment("docs") view=|| view! { <SectionPage title="Documents"/> }/>
                    </ParentRoute>
                </Routes>
            </Router>
        </AuthProvider>
    }
}
