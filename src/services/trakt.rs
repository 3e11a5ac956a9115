// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trakt API client for people, credits and lists.
//!
//! Handles:
//! - OAuth code exchange and token refresh
//! - Person search and movie/show credits
//! - Personal list lookup, creation, likes and item uploads

use crate::config::Config;
use crate::error::AppError;
use crate::models::{
    AddItemsResponse, AppCredentials, Credits, ListItemsBatch, NewList, PersonSearchResult,
    TokenRecord, UserList,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// API version sent in the `trakt-api-version` header.
const TRAKT_API_VERSION: &str = "2";

/// Trakt API client.
#[derive(Clone)]
pub struct TraktClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl TraktClient {
    /// Create a new Trakt client with OAuth credentials.
    pub fn new(
        base_url: impl Into<String>,
        credentials: &AppCredentials,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Create a client from runtime config and the loaded app credentials.
    pub fn from_config(config: &Config, credentials: &AppCredentials) -> Self {
        Self::new(&config.api_url, credentials, &config.redirect_uri)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    // ─── OAuth ───────────────────────────────────────────────────────────────

    /// Exchange an authorization code for a token record.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenRecord, AppError> {
        self.token_request(&[
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .await
    }

    /// Refresh an expired access token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenRecord, AppError> {
        self.token_request(&[
            ("refresh_token", refresh_token),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "refresh_token"),
        ])
        .await
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenRecord, AppError> {
        let url = format!("{}/oauth/token", self.base_url);

        let response = self.http.post(&url).form(form).send().await?;

        let record: TokenRecord = self.check_response_json(response).await?;
        if record.access_token().is_none() {
            return Err(AppError::Decode(
                "token response did not contain an access_token".to_string(),
            ));
        }
        Ok(record)
    }

    // ─── People ──────────────────────────────────────────────────────────────

    /// Search people by name.
    pub async fn search_people(
        &self,
        access_token: &str,
        query: &str,
    ) -> Result<Vec<PersonSearchResult>, AppError> {
        let url = format!("{}/search/person", self.base_url);

        let response = self
            .authed(self.http.get(&url), access_token)
            .query(&[("query", query)])
            .send()
            .await?;

        self.check_response_json(response).await
    }

    /// Movie credits of a person.
    pub async fn person_movie_credits(
        &self,
        access_token: &str,
        person_id: u64,
    ) -> Result<Credits, AppError> {
        let url = format!("{}/people/{}/movies", self.base_url, person_id);
        self.get_credits(&url, access_token).await
    }

    /// Show credits of a person.
    pub async fn person_show_credits(
        &self,
        access_token: &str,
        person_id: u64,
    ) -> Result<Credits, AppError> {
        let url = format!("{}/people/{}/shows", self.base_url, person_id);
        self.get_credits(&url, access_token).await
    }

    /// Movie and show credits of a person, merged (movies first).
    pub async fn person_credits(
        &self,
        access_token: &str,
        person_id: u64,
    ) -> Result<Credits, AppError> {
        let mut credits = self.person_movie_credits(access_token, person_id).await?;
        let shows = self.person_show_credits(access_token, person_id).await?;
        credits.merge(shows);

        tracing::debug!(
            person_id,
            cast = credits.cast.len(),
            departments = credits.crew.len(),
            "Fetched person credits"
        );
        Ok(credits)
    }

    async fn get_credits(&self, url: &str, access_token: &str) -> Result<Credits, AppError> {
        let response = self
            .authed(self.http.get(url), access_token)
            .query(&[("extended", "full")])
            .send()
            .await?;

        self.check_response_json(response).await
    }

    // ─── Lists ───────────────────────────────────────────────────────────────

    /// Lists owned by the authenticated user.
    pub async fn user_lists(&self, access_token: &str) -> Result<Vec<UserList>, AppError> {
        let url = format!("{}/users/me/lists", self.base_url);
        self.get_json(&url, access_token).await
    }

    /// Create a new personal list.
    pub async fn create_list(
        &self,
        access_token: &str,
        list: &NewList,
    ) -> Result<UserList, AppError> {
        let url = format!("{}/users/me/lists", self.base_url);
        self.post_json(&url, access_token, list).await
    }

    /// Like a list.
    pub async fn like_list(&self, access_token: &str, list_id: u64) -> Result<(), AppError> {
        let url = format!("{}/users/me/lists/{}/like", self.base_url, list_id);

        let response = self.authed(self.http.post(&url), access_token).send().await?;

        self.check_response(response).await
    }

    /// Add a batch of movies and shows to a list.
    pub async fn add_list_items(
        &self,
        access_token: &str,
        list_id: u64,
        batch: &ListItemsBatch,
    ) -> Result<AddItemsResponse, AppError> {
        if batch.is_empty() {
            return Ok(AddItemsResponse::default());
        }
        let url = format!("{}/users/me/lists/{}/items", self.base_url, list_id);
        self.post_json(&url, access_token, batch).await
    }

    // ─── Helpers ─────────────────────────────────────────────────────────────

    /// Attach bearer auth and the Trakt API headers.
    fn authed(&self, request: reqwest::RequestBuilder, access_token: &str) -> reqwest::RequestBuilder {
        request
            .bearer_auth(access_token)
            .header("trakt-api-version", TRAKT_API_VERSION)
            .header("trakt-api-key", &self.client_id)
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, AppError> {
        let response = self.authed(self.http.get(url), access_token).send().await?;

        self.check_response_json(response).await
    }

    /// Generic POST request with JSON body and response.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .authed(self.http.post(url), access_token)
            .json(body)
            .send()
            .await?;

        self.check_response_json(response).await
    }

    /// Check response status and return error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<(), AppError> {
        if response.status().is_success() {
            return Ok(());
        }

        Err(Self::status_error(response).await)
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| AppError::Decode(e.to_string()))
    }

    async fn status_error(response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!("Trakt rate limit hit (429)");
        }

        AppError::TraktApi {
            status: status.as_u16(),
            body,
        }
    }
}
