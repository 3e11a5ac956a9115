// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token lifecycle: return a usable access token, refreshing or
//! re-authorizing as needed.

use crate::error::AppError;
use crate::services::credential_store::CredentialStore;
use crate::services::handshake::AuthorizationHandshake;
use crate::services::trakt::TraktClient;
use crate::time_utils::now_epoch_secs;

/// Which path produced the access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Stored token still valid, no network call made
    Cached,
    /// Refreshed with the stored refresh token
    Refreshed,
    /// Issued by a new authorization handshake
    Authorized,
}

/// Decides between the cached token, a refresh, or a full handshake.
pub struct TokenManager<'a> {
    client: &'a TraktClient,
    handshake: &'a AuthorizationHandshake,
}

impl<'a> TokenManager<'a> {
    pub fn new(client: &'a TraktClient, handshake: &'a AuthorizationHandshake) -> Self {
        Self { client, handshake }
    }

    /// Get a valid access token, persisting any newly issued record.
    pub async fn get_valid_access_token(
        &self,
        store: &mut CredentialStore,
    ) -> Result<String, AppError> {
        self.get_valid_access_token_at(store, now_epoch_secs())
            .await
            .map(|(token, _)| token)
    }

    /// Same as [`get_valid_access_token`](Self::get_valid_access_token) with an
    /// explicit clock, also reporting which path was taken.
    pub async fn get_valid_access_token_at(
        &self,
        store: &mut CredentialStore,
        now: i64,
    ) -> Result<(String, TokenSource), AppError> {
        // A fresh record is only useful if it actually holds a token.
        if !store.is_stale_at(now) {
            if let Some(token) = store.tokens().access_token() {
                tracing::debug!("Using stored access token");
                return Ok((token.to_string(), TokenSource::Cached));
            }
        }

        let (record, source) = match store.tokens().refresh_token() {
            Some(refresh_token) => {
                tracing::info!("Access token expired, refreshing");
                let record = self.client.refresh_token(refresh_token).await.map_err(|e| {
                    tracing::error!(error = %e, "Token refresh failed");
                    e
                })?;
                (record, TokenSource::Refreshed)
            }
            None => {
                tracing::info!("No usable credentials, starting authorization");
                (self.handshake.run(self.client).await?, TokenSource::Authorized)
            }
        };

        store.save_at(record, now)?;

        let token = store
            .tokens()
            .access_token()
            .map(str::to_string)
            .ok_or_else(|| AppError::Auth("Trakt issued no access token".to_string()))?;

        tracing::info!(
            source = ?source,
            path = %store.token_path().display(),
            "Obtained and saved access token"
        );
        Ok((token, source))
    }
}
