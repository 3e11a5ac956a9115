//! Interactive person disambiguation.

use dialoguer::{console::Term, Input};

use crate::error::AppError;
use crate::services::PersonCandidate;

/// Map a 1-based user entry to an index into `count` candidates.
pub fn parse_selection(input: &str, count: usize) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    (1..=count).contains(&choice).then(|| choice - 1)
}

/// Show the numbered candidates and read a choice from the terminal.
pub fn choose_person(candidates: &[PersonCandidate]) -> Result<u64, AppError> {
    if candidates.is_empty() {
        eprintln!("No results.");
        return Err(AppError::NoSelection);
    }

    let term = Term::stderr();
    for (i, candidate) in candidates.iter().enumerate() {
        term.write_line(&format!(
            "{}: {} – {}",
            i + 1,
            candidate.name,
            candidate.known_for
        ))
        .map_err(|e| AppError::Prompt(e.to_string()))?;
    }

    let input: String = Input::new()
        .with_prompt("Select number")
        .allow_empty(true)
        .interact_text_on(&term)
        .map_err(|e| AppError::Prompt(e.to_string()))?;

    let index = parse_selection(&input, candidates.len()).ok_or(AppError::NoSelection)?;
    Ok(candidates[index].trakt_id)
}
