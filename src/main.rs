// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! trakt-role-filter command-line entry point.

use clap::Parser;
use std::process::ExitCode;
use trakt_role_filter::{cli::Args, commands, config::Config, error::AppError, AppContext};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::NoSelection) => {
            tracing::debug!("No person selected");
            eprintln!("No person selected.");
            AppError::NoSelection.exit_code()
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            eprintln!("Error: {}", e);
            if let Some(hint) = e.hint() {
                eprintln!("Hint: {}", hint);
            }
            e.exit_code()
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let config = Config::from_env().map_err(|e| AppError::Config(e.to_string()))?;
    tracing::debug!(
        api_url = %config.api_url,
        token_file = %config.token_path.display(),
        "Configuration loaded"
    );

    let mut ctx = AppContext::new(config);
    let mut stdout = std::io::stdout().lock();
    commands::run(&mut ctx, &args, &mut stdout).await
}

/// Initialize logging on stderr; `LOG_FORMAT=json` emits structured JSON.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("trakt_role_filter={},warn", level))
    });

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
