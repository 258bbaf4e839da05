//! Password hashing primitive.
//!
//! bcrypt embeds a random per-call salt and the cost factor in the digest,
//! so equal plaintexts never produce equal digests and verification needs no
//! out-of-band parameters. Comparison inside bcrypt is constant-time.

/// Hash a plaintext password with the given work factor.
///
/// # Errors
///
/// Returns an error if the cost is outside bcrypt's supported range.
pub fn hash(plaintext: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plaintext, cost)
}

/// Verify a plaintext password against a stored digest.
///
/// Fails closed: a malformed or truncated digest returns `false`, never an
/// error, so a corrupted credential record cannot authenticate.
#[must_use]
pub fn verify(plaintext: &str, digest: &str) -> bool {
    bcrypt::verify(plaintext, digest).unwrap_or(false)
}

#[cfg(test)]
#[path = "password_test.rs"]
mod tests;
