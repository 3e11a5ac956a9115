// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interactive OAuth2 authorization-code handshake.

use std::process::{Command, Stdio};
use std::time::Duration;

use crate::config::{redirect_endpoint, Config};
use crate::error::AppError;
use crate::models::TokenRecord;
use crate::routes::callback::CallbackListener;
use crate::services::trakt::TraktClient;

/// Settings for one authorization handshake.
#[derive(Debug, Clone)]
pub struct AuthorizationHandshake {
    authorize_url: String,
    redirect_uri: String,
    open_browser: bool,
    timeout: Option<Duration>,
}

impl AuthorizationHandshake {
    pub fn new(
        authorize_url: impl Into<String>,
        redirect_uri: impl Into<String>,
        open_browser: bool,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            authorize_url: authorize_url.into(),
            redirect_uri: redirect_uri.into(),
            open_browser,
            timeout,
        }
    }

    /// The redirect URI is only parsed when a handshake actually runs.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.authorize_url,
            &config.redirect_uri,
            config.open_browser,
            config.callback_timeout,
        )
    }

    /// The page the user must visit to grant access.
    pub fn authorization_url(&self, client_id: &str, redirect_uri: &str) -> String {
        format!(
            "{}?response_type=code&client_id={}&redirect_uri={}",
            self.authorize_url,
            urlencoding::encode(client_id),
            urlencoding::encode(redirect_uri)
        )
    }

    /// Run the full handshake and return the issued token record.
    ///
    /// The callback listener is bound before the browser is opened so the
    /// redirect cannot arrive before anyone is listening.
    pub async fn run(&self, client: &TraktClient) -> Result<TokenRecord, AppError> {
        let auth_url = self.authorization_url(client.client_id(), client.redirect_uri());

        let (host, port) =
            redirect_endpoint(&self.redirect_uri).map_err(|e| AppError::Config(e.to_string()))?;
        let listener = CallbackListener::bind(&host, port).await?;

        eprintln!("Authorize this application by visiting:\n\n    {}\n", auth_url);
        tracing::info!(
            client_id = %client.client_id(),
            host = %host,
            port,
            "Starting OAuth flow, waiting for Trakt redirect"
        );

        if self.open_browser {
            if let Err(e) = open_in_browser(&auth_url) {
                tracing::warn!(error = %e, "Could not open a browser, open the URL manually");
            }
        }

        let code = listener.wait_for_code(self.timeout).await?;

        tracing::info!("Exchanging authorization code for tokens");
        client.exchange_code(&code).await.map_err(|e| match e {
            AppError::TraktApi { status, body } => {
                tracing::error!(status, body = %body, "Trakt token exchange failed");
                AppError::Auth(format!("token exchange failed with status {}", status))
            }
            other => other,
        })
    }
}

/// Hand `url` to the platform's default URL handler.
fn open_in_browser(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };

    command
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_url_is_encoded() {
        let handshake = AuthorizationHandshake::new(
            "https://api.trakt.tv/oauth/authorize",
            "http://localhost:8000",
            false,
            None,
        );
        let url = handshake.authorization_url("client id", "http://localhost:8000");
        assert_eq!(
            url,
            "https://api.trakt.tv/oauth/authorize?response_type=code\
             &client_id=client%20id&redirect_uri=http%3A%2F%2Flocalhost%3A8000"
        );
    }

    #[test]
    fn test_from_config_keeps_redirect_uri_and_timeout() {
        let config = Config {
            redirect_uri: "http://localhost:8765".to_string(),
            ..Config::default()
        };
        let handshake = AuthorizationHandshake::from_config(&config);
        assert_eq!(handshake.redirect_uri, "http://localhost:8765");
        assert_eq!(handshake.timeout, Some(Duration::from_secs(300)));
    }

    #[tokio::test]
    async fn test_unusable_redirect_uri_fails_when_run() {
        let config = Config {
            redirect_uri: "http://localhost:notaport".to_string(),
            ..Config::default()
        };
        let handshake = AuthorizationHandshake::from_config(&config);
        let client = TraktClient::new(
            "http://127.0.0.1:9",
            &crate::models::AppCredentials {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
            },
            &config.redirect_uri,
        );

        let err = handshake.run(&client).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "unexpected error: {err}");
    }
}
