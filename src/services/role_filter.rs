// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role filtering over a person's credits.

use crate::models::{Credits, FilteredResult, MediaType};

/// Role filter value that selects acting credits. Matched exactly.
pub const CAST_ROLE: &str = "cast";

/// Effective media-type policy resolved from the command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaSelection {
    pub include_movies: bool,
    pub include_shows: bool,
}

impl Default for MediaSelection {
    fn default() -> Self {
        Self {
            include_movies: true,
            include_shows: true,
        }
    }
}

impl MediaSelection {
    /// Resolve the three flags. `all` never excludes anything; setting both
    /// exclusive flags excludes everything.
    pub fn from_flags(movies_only: bool, tv_only: bool, _all: bool) -> Self {
        Self {
            include_movies: !tv_only,
            include_shows: !movies_only,
        }
    }

    pub fn includes(&self, media_type: MediaType) -> bool {
        match media_type {
            MediaType::Movie => self.include_movies,
            MediaType::Show => self.include_shows,
        }
    }
}

/// Filter credits by role and media type.
///
/// An empty `role` keeps everything. Cast credits match only the literal
/// `"cast"`; crew credits match their job case-insensitively. Cast results
/// come first, each group in source order.
pub fn filter_credits(
    credits: &Credits,
    role: &str,
    selection: MediaSelection,
) -> Vec<FilteredResult> {
    let mut results = Vec::new();

    if role.is_empty() || role == CAST_ROLE {
        for credit in &credits.cast {
            if selection.includes(credit.media.media_type()) {
                results.push(FilteredResult::from_media(
                    &credit.media,
                    format!("cast: {}", credit.character),
                ));
            }
        }
    }

    let role_folded = role.to_lowercase();
    for department in &credits.crew {
        for credit in &department.credits {
            if !selection.includes(credit.media.media_type()) {
                continue;
            }
            if role.is_empty() || credit.job.to_lowercase() == role_folded {
                results.push(FilteredResult::from_media(
                    &credit.media,
                    format!("{} ({})", credit.job, department.name),
                ));
            }
        }
    }

    results
}
