use uuid::Uuid;

use tutorium::config::jwt::JwtConfig;
use tutorium::utils::jwt::{create_access_token, verify_token};

fn config(secret: &str, expiry: i64) -> JwtConfig {
    JwtConfig {
        secret: secret.to_string(),
        access_token_expiry: expiry,
    }
}

#[test]
fn token_round_trips_identity_claims() {
    let cfg = config("unit-test-secret", 3600);
    let identity = Uuid::new_v4();

    let token = create_access_token(identity, "user@test.com", &cfg).unwrap();
    let claims = verify_token(&token, &cfg).unwrap();

    assert_eq!(claims.sub, identity.to_string());
    assert_eq!(claims.email, "user@test.com");
    assert_eq!(claims.identity_id().unwrap(), identity);
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let cfg = config("unit-test-secret", 3600);
    let other = config("a-different-secret", 3600);

    let token = create_access_token(Uuid::new_v4(), "user@test.com", &cfg).unwrap();
    assert!(verify_token(&token, &other).is_err());
}

#[test]
fn expired_token_is_rejected() {
    let cfg = config("unit-test-secret", -3600);

    let token = create_access_token(Uuid::new_v4(), "user@test.com", &cfg).unwrap();
    assert!(verify_token(&token, &cfg).is_err());
}

#[test]
fn garbage_token_is_rejected() {
    let cfg = config("unit-test-secret", 3600);
    assert!(verify_token("not-a-jwt", &cfg).is_err());
}
