use super::*;

// =============================================================================
// AuthSession
// =============================================================================

#[test]
fn auth_session_serde_round_trip() {
    let session = AuthSession {
        id: "3f2b8c1e-0000-0000-0000-000000000001".into(),
        name: "Alice".into(),
        email: "alice@example.com".into(),
        token: "abc.def.ghi".into(),
    };
    let json = serde_json::to_string(&session).unwrap();
    let restored: AuthSession = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, session);
}

#[test]
fn auth_session_deserializes_server_response_shape() {
    let json = r#"{"id":"u1","name":"Alice","email":"alice@example.com","token":"t"}"#;
    let session: AuthSession = serde_json::from_str(json).unwrap();
    assert_eq!(session.name, "Alice");
    assert_eq!(session.token, "t");
}

// =============================================================================
// User
// =============================================================================

#[test]
fn user_deserializes_full_record() {
    let json = r#"{
        "id": "u1",
        "name": "Alice",
        "email": "alice@example.com",
        "role": "school",
        "organization_id": "o1",
        "avatar_url": "https://a/1",
        "provider": null
    }"#;
    let user: User = serde_json::from_str(json).unwrap();
    assert_eq!(user.role, "school");
    assert_eq!(user.organization_id.as_deref(), Some("o1"));
    assert!(user.provider.is_none());
}

#[test]
fn user_role_defaults_to_public_when_absent() {
    let json = r#"{"id":"u1","name":"A","email":"a@b.c",
                   "organization_id":null,"avatar_url":null,"provider":null}"#;
    let user: User = serde_json::from_str(json).unwrap();
    assert_eq!(user.role, "public");
}

#[test]
fn user_has_no_password_field() {
    let user = User {
        id: "u1".into(),
        name: "A".into(),
        email: "a@b.c".into(),
        role: "public".into(),
        organization_id: None,
        avatar_url: None,
        provider: None,
    };
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
}

// =============================================================================
// ErrorBody
// =============================================================================

#[test]
fn error_body_parses_gateway_shape() {
    let json = r#"{"error":{"code":"CONFLICT","message":"an account with this email already exists"}}"#;
    let body: ErrorBody = serde_json::from_str(json).unwrap();
    assert_eq!(body.error.code, "CONFLICT");
    assert!(body.error.message.contains("already exists"));
}
