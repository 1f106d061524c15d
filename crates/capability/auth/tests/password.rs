use guard_auth::{AuthError, PasswordPolicy, hash_password, verify_password};

#[test]
fn bcrypt_hash_verifies() {
    let hash = hash_password("admin1234").expect("hash");
    assert_ne!(hash, "admin1234");
    assert!(hash.starts_with("$2"));
    assert!(hash.contains("$10$"));
    assert!(verify_password(&hash, "admin1234").expect("verify"));
}

#[test]
fn wrong_password_rejected() {
    let hash = hash_password("admin1234").expect("hash");
    assert!(!verify_password(&hash, "bad-password").expect("verify"));
}

#[test]
fn policy_rejects_seven_characters() {
    let policy = PasswordPolicy::default();
    let err = policy.check("1234567").expect_err("too short");
    assert!(matches!(err, AuthError::PasswordTooShort { min: 8 }));
    assert_eq!(err.to_string(), "Password must be at least 8 characters long");
    policy.check("12345678").expect("long enough");
}

#[tokio::test]
async fn blocking_hash_verifies() {
    let hash = guard_auth::hash_password_blocking("correct-horse".to_string())
        .await
        .expect("hash");
    assert!(verify_password(&hash, "correct-horse").expect("verify"));
}
