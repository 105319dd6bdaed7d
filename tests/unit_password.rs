use tutorium::utils::password::{hash_password, verify_password};

#[test]
fn hash_and_verify_round_trip() {
    let hashed = hash_password("correct horse battery staple").unwrap();

    assert_ne!(hashed, "correct horse battery staple");
    assert!(verify_password("correct horse battery staple", &hashed).unwrap());
    assert!(!verify_password("wrong password", &hashed).unwrap());
}

#[test]
fn same_password_hashes_differently() {
    let first = hash_password("secret123").unwrap();
    let second = hash_password("secret123").unwrap();
    assert_ne!(first, second);
}

#[test]
fn verify_rejects_malformed_hash() {
    assert!(verify_password("secret123", "not-a-bcrypt-hash").is_err());
}
