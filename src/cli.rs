//! Command-line arguments.

use clap::{ArgGroup, Parser};

use crate::services::MediaSelection;

/// Filter Trakt movies/shows by person and role
#[derive(Parser, Debug, Clone)]
#[command(name = "trakt-role-filter", version, about, long_about = None)]
#[command(group(
    ArgGroup::new("person")
        .required(true)
        .multiple(true)
        .args(["name", "trakt_id"])
))]
pub struct Args {
    /// Person name to search (takes precedence over --trakt-id)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Trakt person ID to use directly
    #[arg(short = 'i', long = "trakt-id", alias = "trakt_id")]
    pub trakt_id: Option<u64>,

    /// Role to filter by ("cast", "director", "writer", ...)
    #[arg(short, long, default_value = "")]
    pub filter: String,

    /// Create or append to this Trakt list instead of printing
    #[arg(short, long)]
    pub list_name: Option<String>,

    /// Limit results to movies
    #[arg(long)]
    pub movies_only: bool,

    /// Limit results to TV shows
    #[arg(long)]
    pub tv_only: bool,

    /// Include both movies and TV shows
    #[arg(long)]
    pub all: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn media_selection(&self) -> MediaSelection {
        MediaSelection::from_flags(self.movies_only, self.tv_only, self.all)
    }
}
