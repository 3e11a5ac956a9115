// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trakt personal lists and list item payloads.

use super::media::{FilteredResult, MediaType, TraktIds};
use serde::{Deserialize, Serialize};

/// A list owned by the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserList {
    pub name: String,
    pub ids: TraktIds,
}

/// Body for `POST /users/me/lists`.
#[derive(Debug, Clone, Serialize)]
pub struct NewList {
    pub name: String,
    pub description: String,
    pub privacy: String,
    pub display_numbers: bool,
    pub allow_comments: bool,
}

impl NewList {
    /// A private list described as produced by this tool.
    pub fn private(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: "media filtered via trakt-role-filter".to_string(),
            privacy: "private".to_string(),
            display_numbers: true,
            allow_comments: false,
        }
    }
}

/// Reference to a catalog item by Trakt ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRef {
    pub ids: ItemIds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemIds {
    pub trakt: u64,
}

/// Body for `POST /users/me/lists/{id}/items`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListItemsBatch {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub movies: Vec<ItemRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shows: Vec<ItemRef>,
}

impl ListItemsBatch {
    pub fn push(&mut self, item: &FilteredResult) {
        let entry = ItemRef {
            ids: ItemIds {
                trakt: item.catalog_id,
            },
        };
        match item.media_type {
            MediaType::Movie => self.movies.push(entry),
            MediaType::Show => self.shows.push(entry),
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len() + self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-type counts in an add-items response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemCounts {
    #[serde(default)]
    pub movies: u32,
    #[serde(default)]
    pub shows: u32,
}

/// Response of `POST /users/me/lists/{id}/items`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddItemsResponse {
    #[serde(default)]
    pub added: ItemCounts,
    #[serde(default)]
    pub existing: ItemCounts,
    #[serde(default)]
    pub not_found: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_serializes_only_non_empty_arrays() {
        let mut batch = ListItemsBatch::default();
        batch.push(&FilteredResult {
            title: "Her".to_string(),
            year: Some(2013),
            catalog_id: 77,
            media_type: MediaType::Movie,
            role_label: "Director (directing)".to_string(),
        });

        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json, serde_json::json!({"movies": [{"ids": {"trakt": 77}}]}));
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_add_items_response_tolerates_missing_fields() {
        let resp: AddItemsResponse =
            serde_json::from_str(r#"{"added": {"movies": 2}, "list": {"item_count": 2}}"#).unwrap();
        assert_eq!(resp.added.movies, 2);
        assert_eq!(resp.added.shows, 0);
        assert_eq!(resp.existing.movies, 0);
    }
}
