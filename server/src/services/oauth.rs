//! OAuth providers — consent URL, code exchange, profile fetch.
//!
//! One `Provider` variant per supported identity provider; the callback
//! handler works against the provider-neutral `ProviderProfile` so adding a
//! provider touches this module only.

use serde::Deserialize;

/// Supported OAuth identity providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    Github,
}

impl Provider {
    /// Canonical lowercase name, as stored in `users.provider` and used in
    /// URL paths.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Github => "github",
        }
    }

    /// Resolve a URL path segment (`/auth/{provider}`) to a provider.
    #[must_use]
    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "google" => Some(Provider::Google),
            "github" => Some(Provider::Github),
            _ => None,
        }
    }

    /// Env var prefix for this provider's configuration.
    fn env_prefix(self) -> &'static str {
        match self {
            Provider::Google => "GOOGLE",
            Provider::Github => "GITHUB",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-provider OAuth client configuration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl ProviderConfig {
    /// Load from `{PREFIX}_CLIENT_ID`, `{PREFIX}_CLIENT_SECRET`,
    /// `{PREFIX}_REDIRECT_URI`. Returns `None` if any are missing (the
    /// provider is disabled).
    pub fn from_lookup(provider: Provider, get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let prefix = provider.env_prefix();
        let client_id = get(&format!("{prefix}_CLIENT_ID"))?;
        let client_secret = get(&format!("{prefix}_CLIENT_SECRET"))?;
        let redirect_uri = get(&format!("{prefix}_REDIRECT_URI"))?;
        Some(Self { provider, client_id, client_secret, redirect_uri })
    }

    /// Build the provider's authorization (consent) URL with a CSRF state.
    /// Query values are percent-encoded; redirect URIs routinely carry
    /// reserved characters.
    #[must_use]
    pub fn authorize_url(&self, state: &str) -> String {
        let client_id = urlencoding::encode(&self.client_id);
        let redirect_uri = urlencoding::encode(&self.redirect_uri);
        let state = urlencoding::encode(state);
        match self.provider {
            Provider::Google => format!(
                "https://accounts.google.com/o/oauth2/v2/auth?client_id={client_id}&redirect_uri={redirect_uri}&response_type=code&scope=openid%20email%20profile&state={state}"
            ),
            Provider::Github => format!(
                "https://github.com/login/oauth/authorize?client_id={client_id}&redirect_uri={redirect_uri}&scope=read:user%20user:email&state={state}"
            ),
        }
    }
}

/// Provider-neutral identity profile, the sole input to
/// `users::find_or_create_by_provider`.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    pub provider: Provider,
    /// Stable identifier assigned by the provider.
    pub provider_id: String,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("token exchange failed: {0}")]
    TokenExchange(String),
    #[error("provider api error: {0}")]
    ProviderApi(String),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange an authorization code for an access token.
pub async fn exchange_code(config: &ProviderConfig, code: &str) -> Result<String, OAuthError> {
    let client = reqwest::Client::new();
    let request = match config.provider {
        Provider::Google => client
            .post("https://oauth2.googleapis.com/token")
            .form(&[
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ]),
        Provider::Github => client
            .post("https://github.com/login/oauth/access_token")
            .header("Accept", "application/json")
            .json(&serde_json::json!({
                "client_id": config.client_id,
                "client_secret": config.client_secret,
                "code": code,
                "redirect_uri": config.redirect_uri,
            })),
    };

    let resp = request
        .send()
        .await
        .map_err(|e| OAuthError::TokenExchange(e.to_string()))?;
    let body = resp
        .text()
        .await
        .map_err(|e| OAuthError::TokenExchange(e.to_string()))?;
    let token_resp: TokenResponse = serde_json::from_str(&body)
        .map_err(|_| OAuthError::TokenExchange(format!("unexpected response: {body}")))?;
    Ok(token_resp.access_token)
}

#[derive(Debug, Deserialize)]
struct GoogleProfile {
    id: String,
    name: Option<String>,
    email: Option<String>,
    picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubProfile {
    id: i64,
    login: String,
    name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
}

/// Fetch the authenticated user's profile from the provider.
pub async fn fetch_profile(provider: Provider, access_token: &str) -> Result<ProviderProfile, OAuthError> {
    let client = reqwest::Client::new();
    let endpoint = match provider {
        Provider::Google => "https://www.googleapis.com/oauth2/v2/userinfo",
        Provider::Github => "https://api.github.com/user",
    };

    let resp = client
        .get(endpoint)
        .header("Authorization", format!("Bearer {access_token}"))
        .header("User-Agent", "terranest")
        .send()
        .await
        .map_err(|e| OAuthError::ProviderApi(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(OAuthError::ProviderApi(format!("{status}: {body}")));
    }

    match provider {
        Provider::Google => {
            let profile: GoogleProfile = resp
                .json()
                .await
                .map_err(|e| OAuthError::ProviderApi(e.to_string()))?;
            Ok(google_profile(profile))
        }
        Provider::Github => {
            let profile: GithubProfile = resp
                .json()
                .await
                .map_err(|e| OAuthError::ProviderApi(e.to_string()))?;
            Ok(github_profile(profile))
        }
    }
}

fn google_profile(raw: GoogleProfile) -> ProviderProfile {
    let name = raw
        .name
        .filter(|n| !n.trim().is_empty())
        .or_else(|| raw.email.as_deref().map(name_from_email))
        .unwrap_or_else(|| "user".to_owned());
    ProviderProfile {
        provider: Provider::Google,
        provider_id: raw.id,
        name,
        email: raw.email,
        avatar_url: raw.picture,
    }
}

fn github_profile(raw: GithubProfile) -> ProviderProfile {
    let name = raw.name.filter(|n| !n.trim().is_empty()).unwrap_or(raw.login);
    ProviderProfile {
        provider: Provider::Github,
        provider_id: raw.id.to_string(),
        name,
        email: raw.email,
        avatar_url: raw.avatar_url,
    }
}

fn name_from_email(email: &str) -> String {
    email
        .split('@')
        .next()
        .filter(|local| !local.trim().is_empty())
        .unwrap_or("user")
        .to_owned()
}

#[cfg(test)]
#[path = "oauth_test.rs"]
mod tests;
