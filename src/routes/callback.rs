// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local OAuth redirect listener.
//!
//! Serves the redirect target for the duration of one authorization, on
//! every address the redirect host resolves to. The first request carrying
//! `code` wins; the listener shuts itself down shortly after answering it.

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::error::AppError;

/// Delay between answering the callback and stopping the listener.
pub const SHUTDOWN_DELAY: Duration = Duration::from_secs(1);

const CONFIRMATION_PAGE: &str = "<!doctype html>\
<html><head><title>Trakt authorization</title></head>\
<body><h1>Authorization received</h1>\
<p>You may close this window and return to the terminal.</p></body></html>";

const WAITING_PAGE: &str = "<!doctype html>\
<html><head><title>Trakt authorization</title></head>\
<body><p>Waiting for Trakt authorization.</p></body></html>";

/// Shared state of the callback handler.
#[derive(Clone)]
pub struct CallbackState {
    code_tx: Arc<Mutex<Option<oneshot::Sender<String>>>>,
    shutdown: Arc<watch::Sender<bool>>,
    shutdown_delay: Duration,
}

impl CallbackState {
    /// Create handler state plus the receiving end for the captured code.
    pub fn new(shutdown_delay: Duration) -> (Self, oneshot::Receiver<String>) {
        let (code_tx, code_rx) = oneshot::channel();
        let state = Self {
            code_tx: Arc::new(Mutex::new(Some(code_tx))),
            shutdown: Arc::new(watch::channel(false).0),
            shutdown_delay,
        };
        (state, code_rx)
    }

    /// Flips to `true` once the listener should stop.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// Hand the code to the waiter; false if a code was already taken.
    fn deliver(&self, code: String) -> bool {
        let sender = match self.code_tx.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match sender {
            Some(tx) => tx.send(code).is_ok(),
            None => false,
        }
    }
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
}

pub fn routes(state: CallbackState) -> Router {
    Router::new()
        .route("/", get(handle_callback))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .with_state(state)
}

/// OAuth redirect target.
async fn handle_callback(
    State(state): State<CallbackState>,
    Query(params): Query<CallbackParams>,
) -> Html<&'static str> {
    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return Html(WAITING_PAGE);
    };

    if state.deliver(code) {
        tracing::info!("Authorization code received");
        let shutdown = state.shutdown.clone();
        let delay = state.shutdown_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shutdown.send_replace(true);
        });
    } else {
        tracing::debug!("Ignoring additional authorization code");
    }

    Html(CONFIRMATION_PAGE)
}

/// A running callback listener.
#[derive(Debug)]
pub struct CallbackListener {
    addrs: Vec<SocketAddr>,
    code_rx: oneshot::Receiver<String>,
    shutdown: Arc<watch::Sender<bool>>,
    servers: Vec<JoinHandle<std::io::Result<()>>>,
}

impl CallbackListener {
    /// Listen on `host:port` and start serving in the background.
    ///
    /// Every address `host` resolves to is bound, so `localhost` is served on
    /// both loopback families where available. Addresses the system cannot
    /// assign are skipped; a port already in use is an error.
    pub async fn bind(host: &str, port: u16) -> Result<Self, AppError> {
        Self::bind_with_delay(host, port, SHUTDOWN_DELAY).await
    }

    pub async fn bind_with_delay(
        host: &str,
        port: u16,
        shutdown_delay: Duration,
    ) -> Result<Self, AppError> {
        let cannot_listen = |e: std::io::Error| {
            AppError::Auth(format!(
                "Cannot listen on {}:{} for the callback: {}",
                host, port, e
            ))
        };

        let mut candidates: Vec<SocketAddr> = Vec::new();
        for addr in tokio::net::lookup_host((host, port))
            .await
            .map_err(cannot_listen)?
        {
            if !candidates.contains(&addr) {
                candidates.push(addr);
            }
        }

        let mut listeners = Vec::new();
        let mut last_error = None;
        for addr in candidates {
            match tokio::net::TcpListener::bind(addr).await {
                Ok(listener) => listeners.push(listener),
                // A taken port is never skipped.
                Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                    return Err(cannot_listen(e));
                }
                Err(e) => {
                    tracing::debug!(address = %addr, error = %e, "Skipping callback address");
                    last_error = Some(e);
                }
            }
        }
        if listeners.is_empty() {
            let error = last_error.unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "host resolved to no addresses")
            });
            return Err(cannot_listen(error));
        }

        let (state, code_rx) = CallbackState::new(shutdown_delay);
        let shutdown = state.shutdown.clone();
        let app = routes(state);

        let mut addrs = Vec::with_capacity(listeners.len());
        let mut servers = Vec::with_capacity(listeners.len());
        for listener in listeners {
            addrs.push(
                listener
                    .local_addr()
                    .map_err(|e| AppError::Internal(e.into()))?,
            );
            let mut signal = shutdown.subscribe();
            let app = app.clone();
            servers.push(tokio::spawn(async move {
                axum::serve(listener, app)
                    .with_graceful_shutdown(async move {
                        let _ = signal.wait_for(|stop| *stop).await;
                    })
                    .await
            }));
        }

        tracing::debug!(addresses = ?addrs, "Callback listener started");

        Ok(Self {
            addrs,
            code_rx,
            shutdown,
            servers,
        })
    }

    /// First bound address.
    pub fn local_addr(&self) -> SocketAddr {
        self.addrs[0]
    }

    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.addrs
    }

    /// Wait for the first code, then for the listener to stop.
    ///
    /// Ends early on Ctrl-C or when `timeout` elapses. The port is released
    /// on every return path.
    pub async fn wait_for_code(self, timeout: Option<Duration>) -> Result<String, AppError> {
        let Self {
            code_rx,
            shutdown,
            servers,
            ..
        } = self;

        let wait = async {
            match timeout {
                Some(limit) => match tokio::time::timeout(limit, code_rx).await {
                    Ok(received) => received.map_err(|_| AppError::Cancelled),
                    Err(_) => Err(AppError::CallbackTimeout(limit.as_secs())),
                },
                None => code_rx.await.map_err(|_| AppError::Cancelled),
            }
        };

        let outcome = tokio::select! {
            result = wait => result,
            _ = tokio::signal::ctrl_c() => Err(AppError::Cancelled),
        };

        // On success the handler already scheduled shutdown.
        if outcome.is_err() {
            shutdown.send_replace(true);
        }
        for server in servers {
            match server.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!(error = %e, "Callback listener failed"),
                Err(e) => tracing::warn!(error = %e, "Callback listener task panicked"),
            }
        }
        tracing::debug!("Callback listener stopped");

        outcome
    }
}
