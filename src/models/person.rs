//! Person search results.

use super::media::TraktIds;
use serde::Deserialize;

/// A person as returned inside search results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Person {
    pub name: String,
    pub ids: TraktIds,
}

/// One hit from `GET /search/person`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PersonSearchResult {
    #[serde(default)]
    pub score: Option<f64>,
    pub person: Person,
}
