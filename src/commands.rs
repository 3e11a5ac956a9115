// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The filter command: authenticate, resolve the person, filter, output.

use std::io::Write;

use crate::cli::Args;
use crate::error::{AppError, Result};
use crate::models::FilteredResult;
use crate::prompt::choose_person;
use crate::services::{filter_credits, search_candidates, ListPublisher, TokenManager};
use crate::AppContext;

/// Run one invocation. Printed results go to `out`.
pub async fn run(ctx: &mut AppContext, args: &Args, out: &mut dyn Write) -> Result<()> {
    if !ctx.store.app().is_complete() {
        return Err(AppError::Config(format!(
            "client_id/client_secret missing from {}",
            ctx.config.config_path.display()
        )));
    }

    let access_token = TokenManager::new(&ctx.client, &ctx.handshake)
        .get_valid_access_token(&mut ctx.store)
        .await?;

    let person_id = resolve_person(ctx, args, &access_token).await?;

    let credits = ctx.client.person_credits(&access_token, person_id).await?;
    if credits.is_empty() {
        tracing::warn!(person_id, "Person has no credits");
    }
    let results = filter_credits(&credits, &args.filter, args.media_selection());
    tracing::info!(
        person_id,
        role = %args.filter,
        matches = results.len(),
        "Filtered credits"
    );

    match args.list_name.as_deref() {
        None => print_results(out, &results),
        Some(list_name) => {
            let publisher =
                ListPublisher::new(&ctx.client, ctx.config.batch_size, ctx.config.batch_delay);
            let report = publisher.publish(&access_token, list_name, &results).await?;
            writeln!(
                out,
                "Added {} item(s) to list \"{}\" ({} already present)",
                report.added, list_name, report.existing
            )
            .map_err(|e| AppError::Internal(e.into()))
        }
    }
}

async fn resolve_person(ctx: &AppContext, args: &Args, access_token: &str) -> Result<u64> {
    if let Some(name) = args.name.as_deref() {
        let candidates = search_candidates(&ctx.client, access_token, name).await?;
        return choose_person(&candidates);
    }

    args.trakt_id.ok_or(AppError::NoSelection)
}

/// Write one line per result.
pub fn print_results(out: &mut dyn Write, results: &[FilteredResult]) -> Result<()> {
    for result in results {
        writeln!(out, "{}", result).map_err(|e| AppError::Internal(e.into()))?;
    }
    Ok(())
}
