//! Gateway error taxonomy.
//!
//! DESIGN
//! ======
//! A closed set of error variants with stable wire codes, so clients match
//! on `error.code` instead of free-text messages. Every variant is recovered
//! at the gateway boundary and rendered as a structured JSON response; none
//! are fatal to the process.
//!
//! `InvalidCredentials` is deliberately uninformative: a login failure reads
//! the same whether the email is unregistered or the password wrong, closing
//! off account enumeration.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("an account with this email already exists")]
    Conflict,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("authentication required")]
    Unauthorized,
    #[error("user not found")]
    NotFound,
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    /// Stable machine-readable code carried in the response body.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Conflict => "CONFLICT",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Internal => "INTERNAL",
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict | ApiError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": { "code": self.code(), "message": self.to_string() }
        });
        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "database error");
        ApiError::Internal
    }
}

impl From<crate::services::token::TokenError> for ApiError {
    fn from(e: crate::services::token::TokenError) -> Self {
        tracing::error!(error = %e, "token issuance failed");
        ApiError::Internal
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(e: bcrypt::BcryptError) -> Self {
        tracing::error!(error = %e, "password hashing failed");
        ApiError::Internal
    }
}

impl From<crate::services::users::UserError> for ApiError {
    fn from(e: crate::services::users::UserError) -> Self {
        match e {
            crate::services::users::UserError::DuplicateEmail => ApiError::Conflict,
            crate::services::users::UserError::Db(db) => db.into(),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
