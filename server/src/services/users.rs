//! Credential store — user identity records.
//!
//! The database, not the application, enforces identity invariants: a
//! `UNIQUE` constraint on `email` (all writes normalized to lowercase) and a
//! unique index on `(provider, provider_id)`. Any pre-check in the gateway
//! is a convenience; concurrent duplicate signups race here and exactly one
//! insert wins.

use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use uuid::Uuid;

use super::oauth::ProviderProfile;

/// Access role, least-privileged first. Stored as lowercase text; unknown
/// stored values decode to the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Public,
    School,
    Corporate,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Public => "public",
            Role::School => "school",
            Role::Corporate => "corporate",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Ok(Role::Public),
            "school" => Ok(Role::School),
            "corporate" => Ok(Role::Corporate),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// A user identity record. `password_hash` is absent only for OAuth-only
/// accounts (schema check constraint).
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub provider: Option<String>,
    pub provider_id: Option<String>,
    pub role: Role,
    pub organization_id: Option<Uuid>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Lowercase and structurally validate an email address. Returns `None` for
/// anything that is not `local@domain`.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

const USER_COLUMNS: &str =
    "id, name, email, password_hash, provider, provider_id, role, organization_id, avatar_url";

fn user_from_row(row: &PgRow) -> User {
    let role: String = row.get("role");
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        provider: row.get("provider"),
        provider_id: row.get("provider_id"),
        role: role.parse().unwrap_or_default(),
        organization_id: row.get("organization_id"),
        avatar_url: row.get("avatar_url"),
    }
}

/// Look up a user by normalized email.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(user_from_row))
}

/// Look up a user by id.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(user_from_row))
}

/// Create a password account. The unique constraint is the authority on
/// email uniqueness; violations surface as `DuplicateEmail`.
pub async fn create(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, UserError> {
    let row = sqlx::query(&format!(
        "INSERT INTO users (name, email, password_hash)
         VALUES ($1, $2, $3)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(map_unique_violation)?;
    Ok(user_from_row(&row))
}

/// Find or create a user from an OAuth profile. Idempotent: repeated calls
/// with the same `(provider, provider_id)` return the same user. When the
/// profile email already belongs to a password account, the provider
/// identity is linked onto that account.
pub async fn find_or_create_by_provider(
    pool: &PgPool,
    profile: &ProviderProfile,
) -> Result<User, UserError> {
    let provider = profile.provider.as_str();
    let email = profile
        .email
        .as_deref()
        .and_then(normalize_email)
        .unwrap_or_else(|| format!("{}@users.{provider}", profile.provider_id));

    let upsert = sqlx::query(&format!(
        "INSERT INTO users (name, email, provider, provider_id, avatar_url)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (provider, provider_id)
         DO UPDATE SET name = EXCLUDED.name, avatar_url = EXCLUDED.avatar_url
         RETURNING {USER_COLUMNS}"
    ))
    .bind(&profile.name)
    .bind(&email)
    .bind(provider)
    .bind(&profile.provider_id)
    .bind(&profile.avatar_url)
    .fetch_one(pool)
    .await;

    match upsert {
        Ok(row) => Ok(user_from_row(&row)),
        // Email collision with an existing password account: link the
        // provider identity onto it instead.
        Err(e) if is_unique_violation(&e) => {
            let row = sqlx::query(&format!(
                "UPDATE users
                 SET provider = $1, provider_id = $2,
                     avatar_url = COALESCE(users.avatar_url, $3)
                 WHERE email = $4
                 RETURNING {USER_COLUMNS}"
            ))
            .bind(provider)
            .bind(&profile.provider_id)
            .bind(&profile.avatar_url)
            .bind(&email)
            .fetch_one(pool)
            .await?;
            Ok(user_from_row(&row))
        }
        Err(e) => Err(e.into()),
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error().is_some_and(|db| db.is_unique_violation())
}

fn map_unique_violation(e: sqlx::Error) -> UserError {
    if is_unique_violation(&e) {
        UserError::DuplicateEmail
    } else {
        UserError::Db(e)
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
