// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed store for the app credentials and the OAuth token record.

use crate::error::AppError;
use crate::models::{AppCredentials, TokenRecord};
use crate::time_utils::{format_epoch_rfc3339, now_epoch_secs};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Holds the static app credentials and the current token record.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    token_path: PathBuf,
    app: AppCredentials,
    tokens: TokenRecord,
}

impl CredentialStore {
    /// Load both files. Missing or malformed files yield empty records.
    pub fn load(config_path: impl AsRef<Path>, token_path: impl AsRef<Path>) -> Self {
        let app = read_json_or_default::<AppCredentials>(config_path.as_ref()).with_env_overrides();
        let tokens = read_json_or_default::<TokenRecord>(token_path.as_ref());

        tracing::debug!(
            config = %config_path.as_ref().display(),
            tokens = %token_path.as_ref().display(),
            has_access_token = tokens.access_token().is_some(),
            has_refresh_token = tokens.refresh_token().is_some(),
            "Loaded credential store"
        );

        Self {
            token_path: token_path.as_ref().to_path_buf(),
            app,
            tokens,
        }
    }

    /// In-memory store, for tests.
    pub fn in_memory(token_path: impl Into<PathBuf>, app: AppCredentials, tokens: TokenRecord) -> Self {
        Self {
            token_path: token_path.into(),
            app,
            tokens,
        }
    }

    pub fn app(&self) -> &AppCredentials {
        &self.app
    }

    pub fn tokens(&self) -> &TokenRecord {
        &self.tokens
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// Whether the stored access token needs replacing now.
    pub fn is_stale(&self) -> bool {
        self.is_stale_at(now_epoch_secs())
    }

    pub fn is_stale_at(&self, now: i64) -> bool {
        self.tokens.is_stale_at(now)
    }

    /// Stamp `created_at = now`, persist and replace the in-memory record.
    pub fn save(&mut self, record: TokenRecord) -> Result<(), AppError> {
        self.save_at(record, now_epoch_secs())
    }

    pub fn save_at(&mut self, mut record: TokenRecord, now: i64) -> Result<(), AppError> {
        record.created_at = Some(now);

        let json = serde_json::to_vec_pretty(&record)
            .map_err(|e| AppError::Storage(format!("Failed to encode token record: {}", e)))?;
        write_private(&self.token_path, &json).map_err(|e| {
            AppError::Storage(format!(
                "Failed to write {}: {}",
                self.token_path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %self.token_path.display(),
            expires_at = %record.expires_at().map(format_epoch_rfc3339).unwrap_or_default(),
            "Saved OAuth tokens"
        );

        self.tokens = record;
        Ok(())
    }
}

/// Read a JSON file, treating a missing or unreadable file as the default value.
fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Unreadable file, treating as empty");
            return T::default();
        }
    };

    match serde_json::from_slice::<Option<T>>(&bytes) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Malformed JSON, treating as empty");
            T::default()
        }
    }
}

/// Write to a sibling temp file, then rename over the target.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&tmp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }

    fs::rename(&tmp_path, path)
}
