// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types and exit-code mapping.

use std::process::ExitCode;

/// Application error type, propagated to the single handler in `main`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credential storage error: {0}")]
    Storage(String),

    #[error("Trakt API error: HTTP {status}: {body}")]
    TraktApi { status: u16, body: String },

    #[error("Trakt request failed: {0}")]
    Http(String),

    #[error("Malformed Trakt response: {0}")]
    Decode(String),

    #[error("Authorization failed: {0}")]
    Auth(String),

    #[error("Timed out after {0} seconds waiting for the authorization callback")]
    CallbackTimeout(u64),

    #[error("Authorization cancelled")]
    Cancelled,

    #[error("No person selected")]
    NoSelection,

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True when Trakt rejected the bearer token or client credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::TraktApi { status: 401, .. })
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(1)
    }

    /// Extra guidance printed after the diagnostic, if any.
    pub fn hint(&self) -> Option<&'static str> {
        const REAUTHORIZE: &str = "delete the token file and rerun to authorize again";
        match self {
            e if e.is_unauthorized() => Some(REAUTHORIZE),
            AppError::TraktApi { status: 400, .. } | AppError::Auth(_) => Some(REAUTHORIZE),
            AppError::Config(_) => Some(
                "set client_id and client_secret in config.json or TRAKT_CLIENT_ID/TRAKT_CLIENT_SECRET",
            ),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::Decode(e.to_string())
        } else {
            AppError::Http(e.to_string())
        }
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
