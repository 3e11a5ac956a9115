//! Person lookup and "known for" summaries used for disambiguation.

use crate::error::AppError;
use crate::models::{Credits, PersonSearchResult};
use crate::services::trakt::TraktClient;

/// Titles shown per candidate in the selection prompt.
pub const KNOWN_FOR_LIMIT: usize = 5;

/// A search hit ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonCandidate {
    pub name: String,
    pub trakt_id: u64,
    pub known_for: String,
}

/// Summarize the first few cast titles, or `N/A`.
pub fn known_for_summary(credits: &Credits, limit: usize) -> String {
    let titles: Vec<String> = credits
        .cast
        .iter()
        .take(limit)
        .map(|c| {
            let summary = c.media.summary();
            match summary.year {
                Some(year) => format!("{} ({})", summary.title, year),
                None => summary.title.clone(),
            }
        })
        .collect();

    if titles.is_empty() {
        "N/A".to_string()
    } else {
        titles.join(", ")
    }
}

/// Search people and attach a "known for" line to each hit.
///
/// A failed "known for" lookup only degrades that candidate's summary.
pub async fn search_candidates(
    client: &TraktClient,
    access_token: &str,
    name: &str,
) -> Result<Vec<PersonCandidate>, AppError> {
    let results: Vec<PersonSearchResult> = client.search_people(access_token, name).await?;
    tracing::debug!(query = %name, hits = results.len(), "Person search complete");

    let mut candidates = Vec::with_capacity(results.len());
    for hit in results {
        tracing::debug!(
            person_id = hit.person.ids.trakt,
            name = %hit.person.name,
            score = hit.score.unwrap_or_default(),
            "Search hit"
        );
        let known_for = match client.person_credits(access_token, hit.person.ids.trakt).await {
            Ok(credits) => known_for_summary(&credits, KNOWN_FOR_LIMIT),
            Err(e) => {
                tracing::debug!(person_id = hit.person.ids.trakt, error = %e, "Known-for lookup failed");
                "N/A".to_string()
            }
        };
        candidates.push(PersonCandidate {
            name: hit.person.name,
            trakt_id: hit.person.ids.trakt,
            known_for,
        });
    }
    Ok(candidates)
}
