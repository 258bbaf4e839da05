//! Session token issuance and verification.
//!
//! Stateless HS256 JWTs carrying the user id as the subject claim. There is
//! no server-side revocation: a token is valid until its expiry, and
//! rotating the signing secret invalidates everything outstanding.
//!
//! Verification collapses every failure mode (bad signature, malformed
//! structure, expiry) into the same `None` so probing clients cannot tell a
//! tampered token from an expired one.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Token lifetime for password signup/login.
pub const PASSWORD_LOGIN_TTL: Duration = Duration::days(7);

/// Token lifetime for OAuth login. Longer than password login by design.
pub const OAUTH_LOGIN_TTL: Duration = Duration::days(30);

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token encoding failed: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the user id.
    sub: Uuid,
    /// Issued at, seconds since the Unix epoch.
    iat: i64,
    /// Expiry, seconds since the Unix epoch.
    exp: i64,
}

/// Signing and verification keys, derived once from the configured secret
/// and shared through `AppState`.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mint a signed token for the user, expiring `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails.
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, TokenError> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims { sub: user_id, iat: now, exp: now + ttl.whole_seconds() };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify a token and return the embedded user id.
    ///
    /// Returns `None` for any invalid token: bad signature, garbage input,
    /// or past expiry. The caller must not distinguish these cases.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Uuid> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .ok()
            .map(|data| data.claims.sub)
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material stays out of logs.
        f.debug_struct("TokenKeys").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
