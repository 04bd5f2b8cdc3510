use super::*;
use crate::net::types::{IdentityError, Role, SessionRecord, User};
use crate::state::session::Session;

fn record() -> SessionRecord {
    SessionRecord {
        access_token: "t".to_owned(),
        user: User { id: 1, name: "Ada".to_owned(), email: "ada@example.com".to_owned(), role: Role::Admin },
    }
}

#[test]
fn layout_renders_while_loading() {
    assert_eq!(layout_outcome(&Session::pending().auth_state(), None), GuardOutcome::Render);
}

#[test]
fn layout_renders_while_loading_with_early_notified_user() {
    let mut session = Session::pending();
    session.apply_change(Some(record()));
    assert_eq!(layout_outcome(&session.auth_state(), None), GuardOutcome::Render);
}

#[test]
fn layout_renders_for_signed_out_visitor() {
    let mut session = Session::pending();
    session.resolve_check(Ok(None));
    assert_eq!(layout_outcome(&session.auth_state(), None), GuardOutcome::Render);
}

#[test]
fn layout_renders_after_backend_failure() {
    let mut session = Session::pending();
    session.resolve_check(Err(IdentityError::Unavailable("down".into())));
    assert_eq!(layout_outcome(&session.auth_state(), None), GuardOutcome::Render);
}

#[test]
fn layout_sends_signed_in_user_to_landing() {
    let mut session = Session::pending();
    session.resolve_check(Ok(Some(record())));
    assert_eq!(layout_outcome(&session.auth_state(), None), GuardOutcome::Redirect(RedirectTarget::to("/dashboard")));
}

#[test]
fn layout_returns_user_to_carried_location() {
    let mut session = Session::pending();
    session.resolve_check(Ok(None));
    session.apply_change(Some(record()));
    let outcome = layout_outcome(&session.auth_state(), Some("/dashboard/finance?q=1"));
    assert_eq!(outcome, GuardOutcome::Redirect(RedirectTarget::to("/dashboard/finance?q=1")));
}

#[test]
fn layout_ignores_unsafe_carried_location() {
    let mut session = Session::pending();
    session.resolve_check(Ok(Some(record())));
    let outcome = layout_outcome(&session.auth_state(), Some("https://evil.example"));
    assert_eq!(outcome, GuardOutcome::Redirect(RedirectTarget::to("/dashboard")));
}
