use super::*;
use crate::net::identity::SessionCheck;
use crate::net::types::{IdentityError, SessionRecord, User};
use crate::state::session::Session;

// =============================================================
// Helpers
// =============================================================

fn user(role: Role) -> User {
    User { id: 1, name: "Ada".to_owned(), email: "ada@example.com".to_owned(), role }
}

fn resolved(outcome: SessionCheck) -> AuthState {
    let mut session = Session::pending();
    session.resolve_check(outcome);
    session.auth_state()
}

fn signed_in(role: Role) -> AuthState {
    resolved(Ok(Some(SessionRecord { access_token: "t".to_owned(), user: user(role) })))
}

fn signed_out() -> AuthState {
    resolved(Ok(None))
}

// =============================================================
// ProtectedRoute
// =============================================================

#[test]
fn protected_waits_while_loading() {
    let state = Session::pending().auth_state();
    assert_eq!(protected_outcome(&state, "/dashboard"), GuardOutcome::Checking);
}

#[test]
fn protected_waits_while_loading_even_with_notified_user() {
    let mut session = Session::pending();
    session.apply_change(Some(SessionRecord { access_token: "t".to_owned(), user: user(Role::Admin) }));
    assert_eq!(protected_outcome(&session.auth_state(), "/dashboard"), GuardOutcome::Checking);
}

#[test]
fn protected_redirects_signed_out_to_login_with_requested_path() {
    let outcome = protected_outcome(&signed_out(), "/dashboard/tasks?page=2");
    assert_eq!(outcome, GuardOutcome::Redirect(RedirectTarget::carrying("/login", "/dashboard/tasks?page=2")));
}

#[test]
fn protected_renders_for_signed_in_user() {
    assert_eq!(protected_outcome(&signed_in(Role::Employee), "/dashboard"), GuardOutcome::Render);
}

#[test]
fn protected_treats_backend_failure_as_signed_out() {
    let failed = resolved(Err(IdentityError::Request("offline".into())));
    assert_eq!(protected_outcome(&failed, "/dashboard"), protected_outcome(&signed_out(), "/dashboard"));
}

#[test]
fn protected_follows_live_sign_in() {
    let mut session = Session::pending();
    session.resolve_check(Ok(None));
    assert!(matches!(protected_outcome(&session.auth_state(), "/dashboard"), GuardOutcome::Redirect(_)));

    session.apply_change(Some(SessionRecord { access_token: "t".to_owned(), user: user(Role::Hr) }));
    assert_eq!(protected_outcome(&session.auth_state(), "/dashboard"), GuardOutcome::Render);
}

#[test]
fn protected_outcome_is_pure() {
    let state = signed_out();
    assert_eq!(protected_outcome(&state, "/x"), protected_outcome(&state.clone(), "/x"));
}

// =============================================================
// GuestRoute
// =============================================================

#[test]
fn guest_waits_while_loading() {
    assert_eq!(guest_outcome(&Session::pending().auth_state(), "/"), GuardOutcome::Checking);
}

#[test]
fn guest_redirects_signed_in_to_landing() {
    let outcome = guest_outcome(&signed_in(Role::Client), "/");
    assert_eq!(outcome, GuardOutcome::Redirect(RedirectTarget::carrying("/dashboard", "/")));
}

#[test]
fn guest_renders_for_signed_out_visitor() {
    assert_eq!(guest_outcome(&signed_out(), "/"), GuardOutcome::Render);
}

#[test]
fn guest_treats_backend_failure_as_signed_out() {
    let failed = resolved(Err(IdentityError::Status { status: 500, message: String::new() }));
    assert_eq!(guest_outcome(&failed, "/"), GuardOutcome::Render);
}

// =============================================================
// RoleGate
// =============================================================

#[test]
fn role_gate_allows_listed_role() {
    assert_eq!(role_outcome(&signed_in(Role::Hr), &[Role::Hr, Role::Admin]), GuardOutcome::Render);
}

#[test]
fn role_gate_empty_list_allows_everyone() {
    assert_eq!(role_outcome(&signed_in(Role::Other("auditor".into())), &[]), GuardOutcome::Render);
}

#[test]
fn role_gate_sends_other_roles_home() {
    let outcome = role_outcome(&signed_in(Role::Client), &[Role::Finance, Role::Admin]);
    assert_eq!(outcome, GuardOutcome::Redirect(RedirectTarget::to("/dashboard/clients")));
}

#[test]
fn role_gate_never_redirects_into_its_own_section() {
    for role in [Role::Hr, Role::Finance, Role::Client, Role::Employee, Role::Marketing, Role::Admin] {
        let allowed = [role.clone()];
        assert_eq!(role_outcome(&signed_in(role), &allowed), GuardOutcome::Render);
    }
}

#[test]
fn role_gate_without_user_renders_nothing() {
    assert_eq!(role_outcome(&signed_out(), &[Role::Hr]), GuardOutcome::Checking);
    assert_eq!(role_outcome(&Session::pending().auth_state(), &[Role::Hr]), GuardOutcome::Checking);
}
