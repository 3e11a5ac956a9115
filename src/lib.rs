// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trakt role filter: list a person's movies and shows by role
//!
//! This crate authenticates against Trakt with OAuth2 (refreshing or
//! re-authorizing as needed), filters a person's credits by role and media
//! type, and prints the result or publishes it to a personal list.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{AuthorizationHandshake, CredentialStore, TraktClient};

/// Everything an invocation needs, constructed once and passed explicitly.
pub struct AppContext {
    pub config: Config,
    pub store: CredentialStore,
    pub client: TraktClient,
    pub handshake: AuthorizationHandshake,
}

impl AppContext {
    /// Load credentials from the configured paths and build the client.
    pub fn new(config: Config) -> Self {
        let store = CredentialStore::load(&config.config_path, &config.token_path);
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: CredentialStore) -> Self {
        let client = TraktClient::from_config(&config, store.app());
        let handshake = AuthorizationHandshake::from_config(&config);
        Self {
            config,
            store,
            client,
            handshake,
        }
    }
}
