use super::*;

// =============================================================================
// bearer_value
// =============================================================================

#[test]
fn bearer_value_formats_header() {
    assert_eq!(bearer_value("abc.def.ghi"), "Bearer abc.def.ghi");
}

// =============================================================================
// parse_error_body
// =============================================================================

#[test]
fn status_401_maps_to_unauthorized() {
    let err = parse_error_body(401, "");
    assert_eq!(err, ApiError::Unauthorized);
}

#[test]
fn status_401_wins_over_parseable_body() {
    let body = r#"{"error":{"code":"UNAUTHORIZED","message":"authentication required"}}"#;
    assert_eq!(parse_error_body(401, body), ApiError::Unauthorized);
}

#[test]
fn structured_body_maps_to_server_error() {
    let body = r#"{"error":{"code":"INVALID_CREDENTIALS","message":"invalid email or password"}}"#;
    let err = parse_error_body(400, body);
    assert_eq!(
        err,
        ApiError::Server {
            code: "INVALID_CREDENTIALS".into(),
            message: "invalid email or password".into(),
        }
    );
}

#[test]
fn conflict_code_passes_through() {
    let body = r#"{"error":{"code":"CONFLICT","message":"taken"}}"#;
    match parse_error_body(400, body) {
        ApiError::Server { code, .. } => assert_eq!(code, "CONFLICT"),
        other => panic!("expected Server error, got {other:?}"),
    }
}

#[test]
fn unparseable_body_maps_to_network_error() {
    let err = parse_error_body(502, "<html>Bad Gateway</html>");
    match err {
        ApiError::Network(detail) => assert!(detail.contains("502")),
        other => panic!("expected Network error, got {other:?}"),
    }
}

#[test]
fn empty_body_maps_to_network_error() {
    assert!(matches!(parse_error_body(500, ""), ApiError::Network(_)));
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn server_error_displays_message_only() {
    let err = ApiError::Server { code: "CONFLICT".into(), message: "email taken".into() };
    assert_eq!(err.to_string(), "email taken");
}

#[test]
fn unauthorized_display() {
    assert_eq!(ApiError::Unauthorized.to_string(), "not authenticated");
}

#[test]
fn network_error_display_carries_detail() {
    let err = ApiError::Network("timeout".into());
    assert!(err.to_string().contains("timeout"));
}

// =============================================================================
// endpoint constants
// =============================================================================

#[test]
fn endpoints_are_under_the_auth_prefix() {
    assert_eq!(SIGNUP_ENDPOINT, "/api/auth/signup");
    assert_eq!(LOGIN_ENDPOINT, "/api/auth/login");
    assert_eq!(ME_ENDPOINT, "/api/auth/me");
}
