// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod credentials;
pub mod list;
pub mod media;
pub mod person;

pub use credentials::{AppCredentials, TokenRecord};
pub use list::{AddItemsResponse, ListItemsBatch, NewList, UserList};
pub use media::{
    CastCredit, CreditMedia, Credits, CrewCredit, Department, FilteredResult, MediaSummary,
    MediaType, TraktIds,
};
pub use person::{Person, PersonSearchResult};
