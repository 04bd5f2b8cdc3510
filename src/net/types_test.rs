use super::*;

// =============================================================
// Role
// =============================================================

#[test]
fn role_from_name_classifies_known_roles() {
    assert_eq!(Role::from_name("admin"), Role::Admin);
    assert_eq!(Role::from_name("Employee"), Role::Employee);
    assert_eq!(Role::from_name(" hr "), Role::Hr);
    assert_eq!(Role::from_name("finance"), Role::Finance);
}

#[test]
fn role_from_name_keeps_unrecognized_names() {
    assert_eq!(Role::from_name("auditor"), Role::Other("auditor".to_owned()));
    assert_eq!(Role::from_name(""), Role::Other(UNKNOWN_ROLE.to_owned()));
}

#[test]
fn role_home_paths() {
    assert_eq!(Role::Admin.home_path(), "/dashboard");
    assert_eq!(Role::Hr.home_path(), "/dashboard/hr");
    assert_eq!(Role::Finance.home_path(), "/dashboard/finance");
    assert_eq!(Role::Client.home_path(), "/dashboard/clients");
    assert_eq!(Role::Other("auditor".to_owned()).home_path(), "/dashboard");
}

#[test]
fn user_serde_uses_plain_role_name() {
    let user = User { id: 7, name: "Ada".to_owned(), email: "ada@example.com".to_owned(), role: Role::Marketing };
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["role"], "marketing");

    let back: User = serde_json::from_value(value).unwrap();
    assert_eq!(back, user);
}

// =============================================================
// IdentityError
// =============================================================

#[test]
fn identity_error_codes_are_stable() {
    assert_eq!(IdentityError::Request("x".into()).error_code(), "E_IDENTITY_REQUEST");
    assert_eq!(IdentityError::Status { status: 500, message: String::new() }.error_code(), "E_IDENTITY_STATUS");
    assert_eq!(IdentityError::Parse("x".into()).error_code(), "E_IDENTITY_PARSE");
    assert_eq!(IdentityError::Unavailable("x".into()).error_code(), "E_IDENTITY_UNAVAILABLE");
}

#[test]
fn identity_error_retryable_only_for_transport_and_server_errors() {
    assert!(IdentityError::Request("offline".into()).retryable());
    assert!(IdentityError::Status { status: 503, message: String::new() }.retryable());
    assert!(IdentityError::Status { status: 429, message: String::new() }.retryable());
    assert!(!IdentityError::Status { status: 401, message: String::new() }.retryable());
    assert!(!IdentityError::Parse("bad json".into()).retryable());
    assert!(!IdentityError::Unavailable("ssr".into()).retryable());
}

#[test]
fn identity_error_user_message_prefers_service_message() {
    let err = IdentityError::Status { status: 400, message: "Email not confirmed".to_owned() };
    assert_eq!(err.user_message(), "Email not confirmed");

    let err = IdentityError::Status { status: 400, message: String::new() };
    assert_eq!(err.user_message(), "Invalid email or password.");
}

#[test]
fn identity_error_user_message_suggests_retry_for_transient_failures() {
    let retry = "Could not reach the sign-in service. Try again in a moment.";
    assert_eq!(IdentityError::Request("offline".into()).user_message(), retry);
    assert_eq!(IdentityError::Status { status: 503, message: String::new() }.user_message(), retry);
    assert_eq!(IdentityError::Parse("bad json".into()).user_message(), "Something went wrong. Please try again.");
}
