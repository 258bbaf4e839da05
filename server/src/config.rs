//! Application configuration.
//!
//! DESIGN
//! ======
//! All environment access happens here, once, at startup. The resulting
//! `AppConfig` is injected into `AppState`; handlers and services never read
//! ambient environment state. Rotating `JWT_SECRET` invalidates every
//! outstanding token, an accepted operational tradeoff.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use crate::services::oauth::{Provider, ProviderConfig};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BCRYPT_COST: u32 = 10;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {0}")]
    Invalid(&'static str),
}

/// Process-wide configuration, loaded once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Upper bound on pooled `PostgreSQL` connections.
    pub db_max_connections: u32,
    pub port: u16,
    /// Symmetric signing secret for session tokens.
    pub jwt_secret: String,
    /// Base URL the OAuth callback redirects to, token appended as a query
    /// parameter. Known weakness: the token lands in browser history and
    /// referrer headers; preserved for frontend compatibility.
    pub dashboard_url: String,
    /// bcrypt work factor for password hashing.
    pub bcrypt_cost: u32,
    /// Google OAuth, disabled when the env vars are absent.
    pub google: Option<ProviderConfig>,
    /// GitHub OAuth, disabled when the env vars are absent.
    pub github: Option<ProviderConfig>,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. `from_env` is this
    /// applied to `std::env::var`; tests supply a map instead of mutating
    /// process-global environment state.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => DEFAULT_PORT,
        };

        let dashboard_url = get("DASHBOARD_URL").unwrap_or_else(|| "/dashboard".to_owned());

        let bcrypt_cost = match get("BCRYPT_COST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("BCRYPT_COST"))?,
            None => DEFAULT_BCRYPT_COST,
        };

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("DB_MAX_CONNECTIONS"))?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            db_max_connections,
            port,
            jwt_secret,
            dashboard_url,
            bcrypt_cost,
            google: ProviderConfig::from_lookup(Provider::Google, &get),
            github: ProviderConfig::from_lookup(Provider::Github, &get),
        })
    }

    /// Configuration for the given provider, if enabled.
    #[must_use]
    pub fn provider(&self, provider: Provider) -> Option<&ProviderConfig> {
        match provider {
            Provider::Google => self.google.as_ref(),
            Provider::Github => self.github.as_ref(),
        }
    }
}
