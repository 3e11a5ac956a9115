//! Runtime configuration loaded from environment variables.
//!
//! Client credentials live in the config file handled by the credential
//! store; this module only covers paths, endpoints and timing knobs.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::{Host, Url};

/// Default Trakt API base URL.
pub const DEFAULT_API_URL: &str = "https://api.trakt.tv";
/// Default Trakt authorization page base URL.
pub const DEFAULT_AUTHORIZE_URL: &str = "https://api.trakt.tv/oauth/authorize";
/// Redirect target registered with the Trakt application.
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the `{client_id, client_secret}` file
    pub config_path: PathBuf,
    /// Path of the persisted OAuth token record
    pub token_path: PathBuf,
    /// Trakt API base URL
    pub api_url: String,
    /// Trakt authorization page
    pub authorize_url: String,
    /// OAuth redirect URI; its port is where the callback listener binds
    pub redirect_uri: String,
    /// Whether to launch the system browser during authorization
    pub open_browser: bool,
    /// How long to wait for the OAuth callback (`None` waits forever)
    pub callback_timeout: Option<Duration>,
    /// Maximum items per list upload request
    pub batch_size: usize,
    /// Pause between successive list uploads
    pub batch_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.json"),
            token_path: PathBuf::from("trakt_token.json"),
            api_url: DEFAULT_API_URL.to_string(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            open_browser: true,
            callback_timeout: Some(Duration::from_secs(300)),
            batch_size: 10,
            batch_delay: Duration::from_secs(1),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let callback_timeout = match env::var("TRAKT_CALLBACK_TIMEOUT_SECS") {
            Ok(v) => match parse_var::<u64>("TRAKT_CALLBACK_TIMEOUT_SECS", &v)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            Err(_) => defaults.callback_timeout,
        };

        let batch_size = match env::var("TRAKT_BATCH_SIZE") {
            Ok(v) => parse_var::<usize>("TRAKT_BATCH_SIZE", &v)?,
            Err(_) => defaults.batch_size,
        };
        if batch_size == 0 {
            return Err(ConfigError::Invalid {
                var: "TRAKT_BATCH_SIZE",
                value: "0".to_string(),
            });
        }

        let batch_delay = match env::var("TRAKT_BATCH_DELAY_MS") {
            Ok(v) => Duration::from_millis(parse_var::<u64>("TRAKT_BATCH_DELAY_MS", &v)?),
            Err(_) => defaults.batch_delay,
        };

        Ok(Self {
            config_path: env::var("TRAKT_CONFIG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.config_path),
            token_path: env::var("TRAKT_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.token_path),
            api_url: env::var("TRAKT_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            authorize_url: env::var("TRAKT_AUTHORIZE_URL").unwrap_or(defaults.authorize_url),
            redirect_uri: env::var("TRAKT_REDIRECT_URI").unwrap_or(defaults.redirect_uri),
            open_browser: !env::var("TRAKT_NO_BROWSER").is_ok_and(|v| is_truthy(&v)),
            callback_timeout,
            batch_size,
            batch_delay,
        })
    }

    /// Config for tests: files under `dir`, API at `api_url`, no browser, no pacing.
    pub fn test_default(dir: &std::path::Path, api_url: &str) -> Self {
        Self {
            config_path: dir.join("config.json"),
            token_path: dir.join("trakt_token.json"),
            api_url: api_url.to_string(),
            open_browser: false,
            callback_timeout: Some(Duration::from_secs(10)),
            batch_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Host and port the callback listener binds, taken from the redirect URI.
    pub fn redirect_endpoint(&self) -> Result<(String, u16), ConfigError> {
        redirect_endpoint(&self.redirect_uri)
    }
}

/// Split a redirect URI into the host and port to listen on.
///
/// IPv6 literals come back without brackets. A URI without an explicit port
/// uses the scheme default.
pub fn redirect_endpoint(redirect_uri: &str) -> Result<(String, u16), ConfigError> {
    const VAR: &str = "TRAKT_REDIRECT_URI";

    let url = Url::parse(redirect_uri.trim())
        .map_err(|source| ConfigError::InvalidUrl { var: VAR, source })?;
    let invalid = || ConfigError::Invalid {
        var: VAR,
        value: redirect_uri.to_string(),
    };

    let host = match url.host().ok_or_else(invalid)? {
        Host::Domain(domain) => domain.to_string(),
        Host::Ipv4(addr) => addr.to_string(),
        Host::Ipv6(addr) => addr.to_string(),
    };
    let port = url.port_or_known_default().ok_or_else(invalid)?;
    Ok((host, port))
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("Invalid URL in {var}: {source}")]
    InvalidUrl {
        var: &'static str,
        source: url::ParseError,
    },
}
