// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current time as Unix epoch seconds.
pub fn now_epoch_secs() -> i64 {
    Utc::now().timestamp()
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format epoch seconds as RFC3339, or `"unknown"` when out of range.
pub fn format_epoch_rfc3339(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(format_utc_rfc3339)
        .unwrap_or_else(|| "unknown".to_string())
}
