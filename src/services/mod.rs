// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod credential_store;
pub mod handshake;
pub mod lists;
pub mod people;
pub mod role_filter;
pub mod tokens;
pub mod trakt;

pub use credential_store::CredentialStore;
pub use handshake::AuthorizationHandshake;
pub use lists::{chunk_items, ListPublisher, PublishReport};
pub use people::{search_candidates, PersonCandidate};
pub use role_filter::{filter_credits, MediaSelection};
pub use tokens::{TokenManager, TokenSource};
pub use trakt::TraktClient;
