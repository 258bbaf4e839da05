//! Wire DTOs for the client/server auth boundary.
//!
//! These types mirror the server's response shapes so serde round-trips
//! stay lossless. Ids travel as strings; the client never interprets them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// An established session, as returned by signup and login and as persisted
/// in durable storage. The token is the bearer credential for every
/// subsequent request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Account email, lowercase.
    pub email: String,
    /// Signed bearer token. Opaque to the client.
    pub token: String,
}

/// The authenticated user as returned by `/api/auth/me`. Never contains
/// password material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Account email, lowercase.
    pub email: String,
    /// Access role (`"public"`, `"school"`, `"corporate"`, `"admin"`).
    #[serde(default = "default_role")]
    pub role: String,
    /// Organization reference (UUID string), if the user belongs to one.
    pub organization_id: Option<String>,
    /// Profile picture URL, if set.
    pub avatar_url: Option<String>,
    /// OAuth provider name for social accounts.
    pub provider: Option<String>,
}

fn default_role() -> String {
    "public".to_owned()
}

/// Structured error body emitted by the gateway:
/// `{"error":{"code","message"}}` with stable codes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// The inner error object. `code` is the stable machine-readable tag the
/// client matches on; `message` is for display only.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
