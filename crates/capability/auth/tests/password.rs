use hms_auth::{AuthError, hash_password, validate_new_password, verify_password_and_maybe_upgrade};

#[test]
fn argon2_hash_verifies() {
    let hash = hash_password("admin123").expect("hash");
    let check = verify_password_and_maybe_upgrade(&hash, "admin123").expect("check");
    assert!(check.verified);
    assert!(check.upgrade_hash.is_none());
}

#[test]
fn legacy_plaintext_upgrades() {
    let check = verify_password_and_maybe_upgrade("guest123", "guest123").expect("check");
    assert!(check.verified);
    assert!(check.upgrade_hash.as_deref().unwrap_or_default().starts_with("$argon2"));
}

#[test]
fn wrong_password_rejected() {
    let check = verify_password_and_maybe_upgrade("admin123", "bad").expect("check");
    assert!(!check.verified);
    assert!(check.upgrade_hash.is_none());
}

#[test]
fn short_password_fails_policy() {
    assert!(matches!(validate_new_password("abc"), Err(AuthError::InvalidInput(_))));
    assert!(validate_new_password("abcdef").is_ok());
}
