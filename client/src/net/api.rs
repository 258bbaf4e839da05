//! REST API helpers for the auth endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, bearer token
//! attached from the stored session. Native builds get stubs since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures map to a small closed `ApiError` so callers can react to
//! `Unauthorized` (clear the session) and surface everything else as a
//! transient notification. Authentication failures are never retried.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{AuthSession, ErrorBody, User};

const SIGNUP_ENDPOINT: &str = "/api/auth/signup";
const LOGIN_ENDPOINT: &str = "/api/auth/login";
const ME_ENDPOINT: &str = "/api/auth/me";

/// Client-side view of a failed API call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// The server rejected the credential; stored session must be cleared.
    Unauthorized,
    /// Any other structured gateway error (stable code + display message).
    Server { code: String, message: String },
    /// Transport failure or unparseable response.
    Network(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized => f.write_str("not authenticated"),
            ApiError::Server { message, .. } => f.write_str(message),
            ApiError::Network(detail) => write!(f, "network error: {detail}"),
        }
    }
}

/// `Authorization` header value for a stored token.
#[must_use]
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

/// Map a non-success response to an `ApiError`. 401 always wins so the
/// session-clearing contract does not depend on the body parsing.
#[must_use]
pub fn parse_error_body(status: u16, body: &str) -> ApiError {
    if status == 401 {
        return ApiError::Unauthorized;
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => ApiError::Server { code: parsed.error.code, message: parsed.error.message },
        Err(_) => ApiError::Network(format!("unexpected response ({status})")),
    }
}

/// Create an account via `POST /api/auth/signup`.
///
/// # Errors
///
/// `Server` with code `VALIDATION_ERROR` or `CONFLICT` on rejection,
/// `Network` on transport failure.
pub async fn signup(name: &str, email: &str, password: &str) -> Result<AuthSession, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "name": name, "email": email, "password": password });
        post_json(SIGNUP_ENDPOINT, &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, email, password);
        Err(ApiError::Network("not available on server".to_owned()))
    }
}

/// Authenticate via `POST /api/auth/login`.
///
/// # Errors
///
/// `Server` with code `INVALID_CREDENTIALS` on rejection, `Network` on
/// transport failure.
pub async fn login(email: &str, password: &str) -> Result<AuthSession, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "email": email, "password": password });
        post_json(LOGIN_ENDPOINT, &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err(ApiError::Network("not available on server".to_owned()))
    }
}

/// Fetch the authenticated user from `GET /api/auth/me` with the stored
/// bearer token attached.
///
/// # Errors
///
/// `Unauthorized` when the token is missing/expired/invalid; the caller
/// must clear the stored session in that case.
pub async fn fetch_current_user(token: &str) -> Result<User, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(ME_ENDPOINT)
            .header("Authorization", &bearer_value(token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(parse_error_body(status, &body));
        }
        resp.json::<User>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err(ApiError::Network("not available on server".to_owned()))
    }
}

#[cfg(feature = "hydrate")]
async fn post_json(endpoint: &str, body: &serde_json::Value) -> Result<AuthSession, ApiError> {
    let resp = gloo_net::http::Request::post(endpoint)
        .json(body)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !resp.ok() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        return Err(parse_error_body(status, &text));
    }
    resp.json::<AuthSession>()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}
