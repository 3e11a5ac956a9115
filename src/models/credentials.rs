//! OAuth token record and app credentials persisted on disk.

use serde::{Deserialize, Serialize};

/// Trakt OAuth token record, as returned by the token endpoint and stored
/// in the token file.
///
/// Every field is optional so that a partial or hand-edited file still
/// loads; the staleness check treats missing expiry data as expired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    /// When the record was issued (Unix epoch seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl TokenRecord {
    /// Absolute expiry instant (epoch seconds), if both parts are known.
    pub fn expires_at(&self) -> Option<i64> {
        Some(self.created_at?.saturating_add(self.expires_in?))
    }

    /// Whether the access token must be replaced at time `now`.
    ///
    /// Missing `expires_in` or `created_at` counts as stale.
    pub fn is_stale_at(&self, now: i64) -> bool {
        match self.expires_at() {
            Some(expires_at) => now >= expires_at,
            None => true,
        }
    }

    /// Non-empty access token, if any.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Non-empty refresh token, if any.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Static Trakt application credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppCredentials {
    #[serde(default, alias = "CLIENT_ID")]
    pub client_id: String,
    #[serde(default, alias = "CLIENT_SECRET")]
    pub client_secret: String,
}

impl AppCredentials {
    /// Apply `TRAKT_CLIENT_ID` / `TRAKT_CLIENT_SECRET` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(id) = std::env::var("TRAKT_CLIENT_ID") {
            self.client_id = id.trim().to_string();
        }
        if let Ok(secret) = std::env::var("TRAKT_CLIENT_SECRET") {
            self.client_secret = secret.trim().to_string();
        }
        self
    }

    /// Both the client ID and secret are present.
    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}
