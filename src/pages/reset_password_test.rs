use super::*;

// =============================================================
// recovery_token
// =============================================================

#[test]
fn recovery_token_reads_recovery_fragment() {
    let fragment = "#access_token=eyJ.recovery&expires_in=3600&refresh_token=r1&token_type=bearer&type=recovery";
    assert_eq!(recovery_token(fragment).as_deref(), Some("eyJ.recovery"));
}

#[test]
fn recovery_token_requires_recovery_type() {
    assert_eq!(recovery_token("#access_token=eyJ.signup&type=signup"), None);
    assert_eq!(recovery_token("#access_token=eyJ.abc"), None);
    assert_eq!(recovery_token("#type=recovery"), None);
    assert_eq!(recovery_token(""), None);
}

// =============================================================
// validate_new_password
// =============================================================

#[test]
fn validate_new_password_accepts_matching_long_password() {
    assert_eq!(validate_new_password("correct horse", "correct horse"), Ok("correct horse".to_owned()));
    assert_eq!(validate_new_password("12345678", "12345678"), Ok("12345678".to_owned()));
}

#[test]
fn validate_new_password_rejects_short_password() {
    assert_eq!(validate_new_password("", ""), Err("Enter a new password."));
    assert_eq!(validate_new_password("1234567", "1234567"), Err("Password must be at least 8 characters."));
}

#[test]
fn validate_new_password_counts_characters_not_bytes() {
    assert_eq!(validate_new_password("ééééééé", "ééééééé"), Err("Password must be at least 8 characters."));
}

#[test]
fn validate_new_password_rejects_mismatch() {
    assert_eq!(validate_new_password("correct horse", "correct hose"), Err("Passwords do not match."));
}
