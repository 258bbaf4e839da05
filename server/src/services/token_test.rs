use super::*;

fn keys() -> TokenKeys {
    TokenKeys::new("test-secret")
}

// =============================================================================
// issue / verify round trip
// =============================================================================

#[test]
fn verify_returns_issuing_user_id() {
    let keys = keys();
    let user_id = Uuid::new_v4();
    let token = keys.issue(user_id, PASSWORD_LOGIN_TTL).unwrap();
    assert_eq!(keys.verify(&token), Some(user_id));
}

#[test]
fn round_trip_with_oauth_ttl() {
    let keys = keys();
    let user_id = Uuid::new_v4();
    let token = keys.issue(user_id, OAUTH_LOGIN_TTL).unwrap();
    assert_eq!(keys.verify(&token), Some(user_id));
}

#[test]
fn distinct_users_produce_distinct_tokens() {
    let keys = keys();
    let a = keys.issue(Uuid::new_v4(), PASSWORD_LOGIN_TTL).unwrap();
    let b = keys.issue(Uuid::new_v4(), PASSWORD_LOGIN_TTL).unwrap();
    assert_ne!(a, b);
}

#[test]
fn token_is_opaque_three_part_string() {
    let token = keys().issue(Uuid::new_v4(), PASSWORD_LOGIN_TTL).unwrap();
    assert_eq!(token.split('.').count(), 3);
}

// =============================================================================
// failure modes all collapse to None
// =============================================================================

#[test]
fn expired_token_is_invalid() {
    let keys = keys();
    // Exp in the past, beyond any leeway.
    let token = keys
        .issue(Uuid::new_v4(), Duration::seconds(-120))
        .unwrap();
    assert_eq!(keys.verify(&token), None);
}

#[test]
fn wrong_secret_is_invalid() {
    let token = keys().issue(Uuid::new_v4(), PASSWORD_LOGIN_TTL).unwrap();
    let other = TokenKeys::new("different-secret");
    assert_eq!(other.verify(&token), None);
}

#[test]
fn tampered_payload_is_invalid() {
    let keys = keys();
    let token = keys.issue(Uuid::new_v4(), PASSWORD_LOGIN_TTL).unwrap();
    let mut parts: Vec<&str> = token.split('.').collect();
    let tampered_payload = parts[1].to_owned() + "x";
    parts[1] = &tampered_payload;
    let tampered = parts.join(".");
    assert_eq!(keys.verify(&tampered), None);
}

#[test]
fn garbage_is_invalid() {
    assert_eq!(keys().verify("not-a-token"), None);
}

#[test]
fn empty_string_is_invalid() {
    assert_eq!(keys().verify(""), None);
}

// =============================================================================
// TTL constants
// =============================================================================

#[test]
fn password_ttl_is_seven_days() {
    assert_eq!(PASSWORD_LOGIN_TTL, Duration::days(7));
}

#[test]
fn oauth_ttl_is_thirty_days() {
    assert_eq!(OAUTH_LOGIN_TTL, Duration::days(30));
}

#[test]
fn debug_does_not_expose_key_material() {
    let debug = format!("{:?}", keys());
    assert!(!debug.contains("test-secret"));
}
