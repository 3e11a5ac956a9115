// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: an in-process fake Trakt API.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use trakt_role_filter::config::Config;
use trakt_role_filter::models::{AppCredentials, TokenRecord};
use trakt_role_filter::services::CredentialStore;
use trakt_role_filter::AppContext;

/// A request the fake API received.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub headers: HeaderMap,
    pub body: String,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Default)]
struct FakeState {
    routes: HashMap<(Method, String), (StatusCode, String)>,
    requests: Vec<RecordedRequest>,
}

/// Fake Trakt API listening on an ephemeral localhost port.
#[derive(Clone)]
pub struct FakeTrakt {
    pub url: String,
    state: Arc<Mutex<FakeState>>,
}

#[allow(dead_code)]
impl FakeTrakt {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(FakeState::default()));
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    /// Serve `body` with `status` for `method path` (query string ignored).
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.state.lock().unwrap().routes.insert(
            (method, path.to_string()),
            (StatusCode::from_u16(status).unwrap(), body.to_string()),
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

async fn handle(
    State(state): State<Arc<Mutex<FakeState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().unwrap_or_default().to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    match state.routes.get(&(method, path)) {
        Some((status, body)) => (
            *status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "no fake route").into_response(),
    }
}

/// App credentials used by all tests.
#[allow(dead_code)]
pub fn test_credentials() -> AppCredentials {
    AppCredentials {
        client_id: "test_client_id".to_string(),
        client_secret: "test_secret".to_string(),
    }
}

/// A token record valid for another hour.
#[allow(dead_code)]
pub fn fresh_tokens(access_token: &str) -> TokenRecord {
    TokenRecord {
        access_token: Some(access_token.to_string()),
        refresh_token: Some("stored_refresh".to_string()),
        expires_in: Some(3600),
        created_at: Some(chrono::Utc::now().timestamp()),
        ..TokenRecord::default()
    }
}

/// Token endpoint response body.
#[allow(dead_code)]
pub fn token_response(access_token: &str, refresh_token: &str) -> Value {
    serde_json::json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": 7776000,
        "refresh_token": refresh_token,
        "scope": "public",
        "created_at": 1_700_000_000
    })
}

/// Context pointed at the fake API with files under `dir`.
#[allow(dead_code)]
pub fn test_context(dir: &Path, fake: &FakeTrakt, tokens: TokenRecord) -> AppContext {
    let config = Config::test_default(dir, &fake.url);
    let store = CredentialStore::in_memory(&config.token_path, test_credentials(), tokens);
    AppContext::with_store(config, store)
}

/// Reserve a free localhost port for a callback listener.
#[allow(dead_code)]
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Movie credits payload for person 1: one cast credit, one directing credit.
#[allow(dead_code)]
pub fn movie_credits() -> Value {
    serde_json::json!({
        "cast": [
            {"characters": ["Lead"], "movie": {"title": "First Feature", "year": 2001, "ids": {"trakt": 101}}}
        ],
        "crew": {
            "directing": [
                {"jobs": ["Director"], "movie": {"title": "Second Feature", "year": 2004, "ids": {"trakt": 102}}}
            ]
        }
    })
}

/// Show credits payload for person 1: one writing credit.
#[allow(dead_code)]
pub fn show_credits() -> Value {
    serde_json::json!({
        "cast": [],
        "crew": {
            "writing": [
                {"jobs": ["Writer"], "show": {"title": "Long Show", "year": 2010, "ids": {"trakt": 201}}}
            ]
        }
    })
}
