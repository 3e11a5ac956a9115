// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Publishing filtered results into a named Trakt list.

use std::time::Duration;

use crate::error::AppError;
use crate::models::{FilteredResult, ListItemsBatch, NewList, UserList};
use crate::services::trakt::TraktClient;

/// Trakt's per-request item limit used for list uploads.
pub const MAX_BATCH_SIZE: usize = 10;

/// Split results into upload batches of at most `batch_size` items, in order.
pub fn chunk_items(items: &[FilteredResult], batch_size: usize) -> Vec<ListItemsBatch> {
    items
        .chunks(batch_size.max(1))
        .map(|chunk| {
            let mut batch = ListItemsBatch::default();
            for item in chunk {
                batch.push(item);
            }
            batch
        })
        .collect()
}

/// Summary of a publish run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub list_id: u64,
    pub batches: usize,
    pub added: u32,
    pub existing: u32,
}

/// Uploads results to a list, one paced batch at a time.
pub struct ListPublisher<'a> {
    client: &'a TraktClient,
    batch_size: usize,
    batch_delay: Duration,
}

impl<'a> ListPublisher<'a> {
    pub fn new(client: &'a TraktClient, batch_size: usize, batch_delay: Duration) -> Self {
        Self {
            client,
            batch_size: batch_size.clamp(1, MAX_BATCH_SIZE),
            batch_delay,
        }
    }

    /// Find a list by case-insensitive name, creating a private one if absent.
    pub async fn find_or_create_list(
        &self,
        access_token: &str,
        name: &str,
    ) -> Result<UserList, AppError> {
        let lists = self.client.user_lists(access_token).await?;
        let wanted = name.to_lowercase();
        if let Some(existing) = lists.into_iter().find(|l| l.name.to_lowercase() == wanted) {
            tracing::info!(list_id = existing.ids.trakt, name = %existing.name, "Using existing list");
            return Ok(existing);
        }

        let created = self
            .client
            .create_list(access_token, &NewList::private(name))
            .await?;
        tracing::info!(list_id = created.ids.trakt, name = %created.name, "Created list");
        Ok(created)
    }

    /// Find or create the list, like it, and upload all items.
    pub async fn publish(
        &self,
        access_token: &str,
        list_name: &str,
        items: &[FilteredResult],
    ) -> Result<PublishReport, AppError> {
        let list = self.find_or_create_list(access_token, list_name).await?;
        let list_id = list.ids.trakt;

        if let Err(e) = self.client.like_list(access_token, list_id).await {
            tracing::warn!(list_id, error = %e, "Could not like list, continuing anyway");
        }

        let mut report = self.upload(access_token, list_id, items).await?;
        report.list_id = list_id;
        Ok(report)
    }

    /// Upload items in batches, pausing between successive requests.
    pub async fn upload(
        &self,
        access_token: &str,
        list_id: u64,
        items: &[FilteredResult],
    ) -> Result<PublishReport, AppError> {
        let batches = chunk_items(items, self.batch_size);
        let mut report = PublishReport {
            list_id,
            ..PublishReport::default()
        };

        for (index, batch) in batches.iter().enumerate() {
            if index > 0 && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }

            let response = self.client.add_list_items(access_token, list_id, batch).await?;
            report.batches += 1;
            report.added += response.added.movies + response.added.shows;
            report.existing += response.existing.movies + response.existing.shows;

            tracing::debug!(
                list_id,
                batch = index + 1,
                of = batches.len(),
                items = batch.len(),
                added = response.added.movies + response.added.shows,
                not_found = %response.not_found,
                "Uploaded list batch"
            );
        }

        tracing::info!(
            list_id,
            batches = report.batches,
            added = report.added,
            existing = report.existing,
            "List updated"
        );
        Ok(report)
    }
}
