use super::*;

// =============================================================
// Helpers
// =============================================================

fn user(id: i64, role: Role) -> User {
    User { id, name: format!("user-{id}"), email: format!("u{id}@example.com"), role }
}

fn record(id: i64) -> SessionRecord {
    SessionRecord { access_token: format!("tok-{id}"), user: user(id, Role::Employee) }
}

// =============================================================
// Session transitions
// =============================================================

#[test]
fn pending_session_is_loading_without_user() {
    let session = Session::default();
    assert!(session.loading);
    assert!(session.user.is_none());
    assert!(session.error.is_none());
}

#[test]
fn resolve_check_with_session_sets_user() {
    let mut session = Session::pending();
    session.resolve_check(Ok(Some(record(1))));
    assert!(!session.loading);
    assert_eq!(session.user.as_ref().map(|u| u.id), Some(1));
    assert!(session.error.is_none());
}

#[test]
fn resolve_check_without_session_leaves_user_empty() {
    let mut session = Session::pending();
    session.resolve_check(Ok(None));
    assert!(!session.loading);
    assert!(session.user.is_none());
}

#[test]
fn resolve_check_failure_records_error_and_keeps_user() {
    let mut session = Session::pending();
    session.resolve_check(Err(IdentityError::Request("offline".into())));
    assert!(!session.loading);
    assert!(session.user.is_none());
    assert_eq!(session.error, Some(IdentityError::Request("offline".into())));
}

#[test]
fn resolve_check_failure_after_notification_keeps_notified_user() {
    let mut session = Session::pending();
    session.apply_change(Some(record(4)));
    session.resolve_check(Err(IdentityError::Parse("bad".into())));
    assert_eq!(session.user.as_ref().map(|u| u.id), Some(4));
    assert!(!session.loading);
}

#[test]
fn apply_change_does_not_touch_loading_or_error() {
    let mut session = Session::pending();
    session.apply_change(Some(record(2)));
    assert!(session.loading);
    assert!(session.error.is_none());
    assert!(session.user.is_some());

    session.resolve_check(Err(IdentityError::Unavailable("down".into())));
    session.apply_change(None);
    assert!(!session.loading);
    assert!(session.error.is_some());
    assert!(session.user.is_none());
}

#[test]
fn later_check_resolution_overwrites_earlier_notification() {
    let mut session = Session::pending();
    session.apply_change(Some(record(5)));
    session.resolve_check(Ok(None));
    assert!(session.user.is_none());
}

// =============================================================
// AuthState
// =============================================================

#[test]
fn auth_state_tracks_user_presence() {
    let mut session = Session::pending();
    assert!(!session.auth_state().is_authenticated);
    assert!(session.auth_state().loading);

    session.resolve_check(Ok(Some(record(1))));
    let state = session.auth_state();
    assert!(state.is_authenticated);
    assert!(!state.loading);
}

#[test]
fn auth_state_default_is_signed_out() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.is_authenticated);
}

#[test]
fn role_helpers_follow_user_role() {
    let session = Session { user: Some(user(1, Role::Finance)), loading: false, error: None };
    let state = session.auth_state();
    assert!(state.is_finance());
    assert!(!state.is_admin());
    assert!(!state.is_hr());
    assert_eq!(state.role(), Some(&Role::Finance));
}

#[test]
fn role_helpers_false_without_user() {
    let state = Session::pending().auth_state();
    assert!(!state.is_admin());
    assert!(!state.is_employee());
    assert!(!state.is_client());
    assert!(!state.is_marketing());
    assert!(state.role().is_none());
}
