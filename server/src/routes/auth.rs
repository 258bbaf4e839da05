//! Auth gateway — signup, login, me, and the OAuth browser flow.
//!
//! ARCHITECTURE
//! ============
//! Password flows issue 7-day bearer tokens; OAuth callbacks issue 30-day
//! tokens and hand them to the frontend by redirecting to the dashboard URL
//! with the token as a query parameter. The latter is a preserved
//! compatibility decision, not a recommendation: the token is visible in
//! browser history and referrer headers.
//!
//! Login failures are uniform `INVALID_CREDENTIALS` whether the email is
//! unregistered, OAuth-only, or the password is wrong.

use std::fmt::Write as _;

use axum::extract::{FromRef, Path, Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rand::Rng;
use serde::{Deserialize, Serialize};
use time::Duration;
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::{oauth, password, token, users};
use crate::state::AppState;

const OAUTH_STATE_COOKIE_NAME: &str = "oauth_state";

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated caller resolved from the `Authorization: Bearer` header.
/// Use as a handler parameter to require authentication; carries only the
/// verified user id, downstream handlers load what they need.
pub struct AuthUser {
    pub user_id: Uuid,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        // Absent, malformed, tampered, and expired tokens are all the same
        // 401 so probing requests learn nothing about token validity.
        let token = bearer_token_from_header(header).ok_or(ApiError::Unauthorized)?;
        let app_state = AppState::from_ref(state);
        let user_id = app_state
            .tokens
            .verify(token)
            .ok_or(ApiError::Unauthorized)?;

        Ok(Self { user_id })
    }
}

/// Extract the token from an `Authorization` header value. Strict: exactly
/// one `Bearer` scheme followed by one non-empty token.
pub(crate) fn bearer_token_from_header(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split_whitespace();
    let scheme = parts.next()?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = parts.next().filter(|t| !t.is_empty())?;
    if parts.next().is_some() {
        return None;
    }
    Some(token)
}

// =============================================================================
// REQUEST / RESPONSE BODIES
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SignupBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Session established by signup or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// A user as exposed over the wire. Constructed from `users::User` without
/// the password hash, so the hash cannot leak by construction.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: users::Role,
    pub organization_id: Option<Uuid>,
    pub avatar_url: Option<String>,
    pub provider: Option<String>,
}

impl From<users::User> for UserResponse {
    fn from(user: users::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            organization_id: user.organization_id,
            avatar_url: user.avatar_url,
            provider: user.provider,
        }
    }
}

// =============================================================================
// PASSWORD HANDLERS
// =============================================================================

/// `POST /api/auth/signup` (alias `/api/auth/register`).
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupBody>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let name = body.name.trim();
    if name.is_empty() || body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::Validation(
            "name, email and password are required".to_owned(),
        ));
    }
    let email = users::normalize_email(&body.email)
        .ok_or_else(|| ApiError::Validation("invalid email address".to_owned()))?;

    // Convenience pre-check for a friendly error; the unique constraint in
    // the store remains the authority under concurrency.
    if users::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(ApiError::Conflict);
    }

    let hash = password::hash(&body.password, state.config.bcrypt_cost)?;
    let user = users::create(&state.pool, name, &email, &hash).await?;
    let token = state.tokens.issue(user.id, token::PASSWORD_LOGIN_TTL)?;

    tracing::info!(user_id = %user.id, "user signed up");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse { id: user.id, name: user.name, email: user.email, token }),
    ))
}

/// `POST /api/auth/login`.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<AuthResponse>, ApiError> {
    // A malformed email cannot match an account; same error as a mismatch.
    let Some(email) = users::normalize_email(&body.email) else {
        return Err(ApiError::InvalidCredentials);
    };
    let Some(user) = users::find_by_email(&state.pool, &email).await? else {
        return Err(ApiError::InvalidCredentials);
    };
    // OAuth-only accounts have no password to check.
    let Some(hash) = user.password_hash.as_deref() else {
        return Err(ApiError::InvalidCredentials);
    };
    if !password::verify(&body.password, hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.tokens.issue(user.id, token::PASSWORD_LOGIN_TTL)?;
    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse { id: user.id, name: user.name, email: user.email, token }))
}

/// `GET /api/auth/me` — the authenticated user, password hash stripped.
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    // Token valid but the referent gone: distinct from a bad token.
    let user = users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(user.into()))
}

// =============================================================================
// OAUTH FLOW
// =============================================================================

fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Random CSRF state value for the OAuth round trip.
fn generate_oauth_state() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

fn cookie_secure(state: &AppState) -> bool {
    state.config.dashboard_url.starts_with("https://")
}

/// Dashboard URL with the token appended as a query parameter.
pub(crate) fn dashboard_redirect_url(base: &str, token: &str) -> String {
    format!("{base}?token={token}")
}

/// `GET /auth/{provider}` — set the CSRF state cookie and redirect to the
/// provider's consent page.
pub async fn oauth_redirect(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Response {
    let Some(provider) = oauth::Provider::from_path(&provider) else {
        return (StatusCode::NOT_FOUND, "unknown provider").into_response();
    };
    let Some(config) = state.config.provider(provider) else {
        return (StatusCode::SERVICE_UNAVAILABLE, "provider not configured").into_response();
    };

    let oauth_state = generate_oauth_state();
    let cookie = Cookie::build((OAUTH_STATE_COOKIE_NAME, oauth_state.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure(&state))
        .max_age(Duration::minutes(10));

    let jar = CookieJar::new().add(cookie);
    (jar, Redirect::temporary(&config.authorize_url(&oauth_state))).into_response()
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: String,
    state: Option<String>,
}

/// `GET /auth/{provider}/callback` — exchange the code, resolve or create
/// the user, and redirect to the dashboard with a 30-day token.
pub async fn oauth_callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    jar: CookieJar,
    Query(params): Query<CallbackQuery>,
) -> Response {
    let Some(provider) = oauth::Provider::from_path(&provider) else {
        return (StatusCode::NOT_FOUND, "unknown provider").into_response();
    };
    let Some(config) = state.config.provider(provider) else {
        return (StatusCode::SERVICE_UNAVAILABLE, "provider not configured").into_response();
    };

    // Verify OAuth CSRF state from the cookie.
    let Some(callback_state) = params.state.as_deref() else {
        return (StatusCode::BAD_REQUEST, "missing oauth state").into_response();
    };
    let expected_state = jar
        .get(OAUTH_STATE_COOKIE_NAME)
        .map(Cookie::value)
        .unwrap_or_default();
    if expected_state.is_empty() || expected_state != callback_state {
        return (StatusCode::UNAUTHORIZED, "invalid oauth state").into_response();
    }

    let access_token = match oauth::exchange_code(config, &params.code).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(%provider, error = %e, "oauth code exchange failed");
            return (StatusCode::BAD_GATEWAY, "OAuth code exchange failed").into_response();
        }
    };

    let profile = match oauth::fetch_profile(provider, &access_token).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(%provider, error = %e, "provider profile fetch failed");
            return (StatusCode::BAD_GATEWAY, "Failed to fetch provider profile").into_response();
        }
    };

    let user = match users::find_or_create_by_provider(&state.pool, &profile).await {
        Ok(u) => u,
        Err(e) => {
            tracing::error!(%provider, error = %e, "provider user resolution failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to resolve user").into_response();
        }
    };

    let token = match state.tokens.issue(user.id, token::OAUTH_LOGIN_TTL) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "token issuance failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session").into_response();
        }
    };

    let clear_state_cookie = Cookie::build((OAUTH_STATE_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure(&state))
        .max_age(Duration::ZERO);
    let jar = jar.add(clear_state_cookie);

    tracing::info!(user_id = %user.id, %provider, "oauth login");
    let location = dashboard_redirect_url(&state.config.dashboard_url, &token);
    (jar, Redirect::temporary(&location)).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
