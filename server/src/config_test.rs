use super::*;

use std::collections::HashMap;

fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

const BASE: &[(&str, &str)] = &[
    ("DATABASE_URL", "postgres://localhost/terranest"),
    ("JWT_SECRET", "s3cret"),
];

// =============================================================================
// required variables
// =============================================================================

#[test]
fn minimal_config_loads_with_defaults() {
    let config = AppConfig::from_lookup(lookup(BASE)).unwrap();
    assert_eq!(config.database_url, "postgres://localhost/terranest");
    assert_eq!(config.jwt_secret, "s3cret");
    assert_eq!(config.port, 3000);
    assert_eq!(config.bcrypt_cost, 10);
    assert_eq!(config.db_max_connections, 5);
    assert_eq!(config.dashboard_url, "/dashboard");
    assert!(config.google.is_none());
    assert!(config.github.is_none());
}

#[test]
fn missing_database_url_fails() {
    let err = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "s")])).unwrap_err();
    assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
}

#[test]
fn missing_jwt_secret_fails() {
    let err =
        AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")])).unwrap_err();
    assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
}

#[test]
fn blank_jwt_secret_fails() {
    let err = AppConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://x"),
        ("JWT_SECRET", "   "),
    ]))
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid("JWT_SECRET")));
}

// =============================================================================
// overrides
// =============================================================================

#[test]
fn port_override_parses() {
    let mut vars = BASE.to_vec();
    vars.push(("PORT", "8080"));
    let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
    assert_eq!(config.port, 8080);
}

#[test]
fn invalid_port_fails() {
    let mut vars = BASE.to_vec();
    vars.push(("PORT", "not-a-port"));
    let err = AppConfig::from_lookup(lookup(&vars)).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid("PORT")));
}

#[test]
fn invalid_bcrypt_cost_fails() {
    let mut vars = BASE.to_vec();
    vars.push(("BCRYPT_COST", "high"));
    let err = AppConfig::from_lookup(lookup(&vars)).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid("BCRYPT_COST")));
}

#[test]
fn db_max_connections_override_parses() {
    let mut vars = BASE.to_vec();
    vars.push(("DB_MAX_CONNECTIONS", "20"));
    let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
    assert_eq!(config.db_max_connections, 20);
}

#[test]
fn dashboard_url_override() {
    let mut vars = BASE.to_vec();
    vars.push(("DASHBOARD_URL", "https://app.terranest.example/dashboard"));
    let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
    assert_eq!(config.dashboard_url, "https://app.terranest.example/dashboard");
}

// =============================================================================
// providers
// =============================================================================

#[test]
fn google_provider_loads_when_fully_configured() {
    let mut vars = BASE.to_vec();
    vars.extend([
        ("GOOGLE_CLIENT_ID", "gid"),
        ("GOOGLE_CLIENT_SECRET", "gsecret"),
        ("GOOGLE_REDIRECT_URI", "http://localhost:3000/auth/google/callback"),
    ]);
    let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
    let google = config.provider(Provider::Google).unwrap();
    assert_eq!(google.client_id, "gid");
    assert!(config.provider(Provider::Github).is_none());
}

#[test]
fn partial_provider_config_disables_provider() {
    let mut vars = BASE.to_vec();
    vars.extend([("GITHUB_CLIENT_ID", "id-only")]);
    let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
    assert!(config.github.is_none());
}

#[test]
fn both_providers_can_be_enabled() {
    let mut vars = BASE.to_vec();
    vars.extend([
        ("GOOGLE_CLIENT_ID", "gid"),
        ("GOOGLE_CLIENT_SECRET", "gs"),
        ("GOOGLE_REDIRECT_URI", "http://localhost/g"),
        ("GITHUB_CLIENT_ID", "hid"),
        ("GITHUB_CLIENT_SECRET", "hs"),
        ("GITHUB_REDIRECT_URI", "http://localhost/h"),
    ]);
    let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
    assert!(config.google.is_some());
    assert!(config.github.is_some());
}

#[test]
fn config_error_display() {
    let msg = ConfigError::Missing("JWT_SECRET").to_string();
    assert!(msg.contains("JWT_SECRET"));
    assert!(msg.contains("missing"));
}
