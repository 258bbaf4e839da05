//! Session state for the current browser user.
//!
//! ARCHITECTURE
//! ============
//! On startup the session is restored optimistically from `localStorage`
//! without a network round trip; it is not revalidated until the first
//! authenticated call fails. When any API call reports `UNAUTHORIZED`, the
//! caller invokes `handle_unauthorized` to clear both in-memory and
//! persisted state, forcing a fresh login.
//!
//! Fields are plain; a signal-based UI layer wraps this in its own
//! reactivity.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::AuthSession;

/// Fixed `localStorage` key holding the serialized session object.
pub const STORAGE_KEY: &str = "terranest_session";

/// Session state tracking the active session and restore status.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Active session, if any.
    pub session: Option<AuthSession>,
    /// True while a restore/profile fetch is in flight.
    pub loading: bool,
}

impl SessionState {
    /// Restore the persisted session, if any, as the active one. Optimistic:
    /// the token is trusted until a request fails with `UNAUTHORIZED`.
    #[must_use]
    pub fn restore() -> Self {
        Self { session: read_storage().as_deref().and_then(decode_session), loading: false }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The stored bearer token, if a session is active.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// `Authorization` header value for outbound requests, if a session is
    /// active.
    #[must_use]
    pub fn bearer_header(&self) -> Option<String> {
        self.token().map(crate::net::api::bearer_value)
    }

    /// Persist and activate a session returned by signup or login.
    pub fn establish(&mut self, session: AuthSession) {
        write_storage(&encode_session(&session));
        self.session = Some(session);
        self.loading = false;
    }

    /// Log out: drop the active session and its persisted copy. Purely
    /// client-side; the token itself stays valid until expiry.
    pub fn clear(&mut self) {
        clear_storage();
        self.session = None;
        self.loading = false;
    }

    /// React to an `UNAUTHORIZED` API response: the stored token is no
    /// longer accepted, so the session is cleared rather than retried.
    pub fn handle_unauthorized(&mut self) {
        self.clear();
    }
}

/// Extract the `token` query parameter delivered by the OAuth callback
/// redirect (`{dashboard}?token=...`). Accepts the query with or without
/// the leading `?`.
#[must_use]
pub fn token_from_query(query: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix("token="))
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
}

// =============================================================================
// SERIALIZATION
// =============================================================================

pub(crate) fn encode_session(session: &AuthSession) -> String {
    serde_json::to_string(session).unwrap_or_default()
}

/// Decode a persisted session. Corrupt or outdated payloads yield `None`
/// and the user simply logs in again.
pub(crate) fn decode_session(raw: &str) -> Option<AuthSession> {
    serde_json::from_str(raw).ok()
}

// =============================================================================
// STORAGE (browser only)
// =============================================================================

fn read_storage() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(STORAGE_KEY).ok()?
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

fn write_storage(value: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(STORAGE_KEY, value);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = value;
    }
}

fn clear_storage() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}
