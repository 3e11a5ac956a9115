// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Filmography credits and filtered results.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifiers attached to a movie, show, person or list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraktIds {
    pub trakt: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Title summary shared by movies and shows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaSummary {
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub ids: TraktIds,
}

/// Kind of catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Show,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Show => "show",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The title a credit refers to: exactly one of a movie or a show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditMedia {
    Movie(MediaSummary),
    Show(MediaSummary),
}

impl CreditMedia {
    pub fn media_type(&self) -> MediaType {
        match self {
            CreditMedia::Movie(_) => MediaType::Movie,
            CreditMedia::Show(_) => MediaType::Show,
        }
    }

    pub fn summary(&self) -> &MediaSummary {
        match self {
            CreditMedia::Movie(m) | CreditMedia::Show(m) => m,
        }
    }
}

/// Credit entry as it appears on the wire, before validation.
#[derive(Deserialize)]
pub struct RawCredit {
    #[serde(default)]
    movie: Option<MediaSummary>,
    #[serde(default)]
    show: Option<MediaSummary>,
    #[serde(default)]
    character: Option<String>,
    #[serde(default)]
    characters: Option<Vec<String>>,
    #[serde(default)]
    job: Option<String>,
    #[serde(default)]
    jobs: Option<Vec<String>>,
}

impl RawCredit {
    fn into_media(self) -> Result<(CreditMedia, Option<String>, Option<String>), String> {
        let media = match (self.movie, self.show) {
            (Some(movie), None) => CreditMedia::Movie(movie),
            (None, Some(show)) => CreditMedia::Show(show),
            (None, None) => return Err("credit has neither a movie nor a show".to_string()),
            (Some(_), Some(_)) => return Err("credit has both a movie and a show".to_string()),
        };
        let character = self
            .character
            .or_else(|| self.characters.into_iter().flatten().next());
        let job = self.job.or_else(|| self.jobs.into_iter().flatten().next());
        Ok((media, character, job))
    }
}

/// An acting credit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCredit")]
pub struct CastCredit {
    pub media: CreditMedia,
    pub character: String,
}

impl TryFrom<RawCredit> for CastCredit {
    type Error = String;

    fn try_from(raw: RawCredit) -> Result<Self, Self::Error> {
        let (media, character, _) = raw.into_media()?;
        Ok(Self {
            media,
            character: character.unwrap_or_default(),
        })
    }
}

/// A production credit. The department is the key it was listed under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCredit")]
pub struct CrewCredit {
    pub media: CreditMedia,
    pub job: String,
}

impl TryFrom<RawCredit> for CrewCredit {
    type Error = String;

    fn try_from(raw: RawCredit) -> Result<Self, Self::Error> {
        let (media, _, job) = raw.into_media()?;
        Ok(Self {
            media,
            job: job.unwrap_or_default(),
        })
    }
}

/// Crew credits of one department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub name: String,
    pub credits: Vec<CrewCredit>,
}

/// A person's credits, grouped the way Trakt returns them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastCredit>,
    /// Departments in document order
    #[serde(default, deserialize_with = "departments_in_order")]
    pub crew: Vec<Department>,
}

impl Credits {
    /// Append another credits payload: cast is concatenated, departments are
    /// merged by name keeping first-seen order.
    pub fn merge(&mut self, other: Credits) {
        self.cast.extend(other.cast);
        for dept in other.crew {
            match self.crew.iter_mut().find(|d| d.name == dept.name) {
                Some(existing) => existing.credits.extend(dept.credits),
                None => self.crew.push(dept),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cast.is_empty() && self.crew.iter().all(|d| d.credits.is_empty())
    }
}

fn departments_in_order<'de, D>(deserializer: D) -> Result<Vec<Department>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DepartmentsVisitor;

    impl<'de> Visitor<'de> for DepartmentsVisitor {
        type Value = Vec<Department>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of department name to crew credits")
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut departments = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, credits)) = map.next_entry::<String, Vec<CrewCredit>>()? {
                departments.push(Department { name, credits });
            }
            Ok(departments)
        }
    }

    deserializer.deserialize_any(DepartmentsVisitor)
}

/// Normalized, role-tagged output record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredResult {
    pub title: String,
    pub year: Option<i32>,
    pub catalog_id: u64,
    pub media_type: MediaType,
    pub role_label: String,
}

impl FilteredResult {
    pub fn from_media(media: &CreditMedia, role_label: String) -> Self {
        let summary = media.summary();
        Self {
            title: summary.title.clone(),
            year: summary.year,
            catalog_id: summary.ids.trakt,
            media_type: media.media_type(),
            role_label,
        }
    }
}

impl fmt::Display for FilteredResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{} ({})", self.title, year)?,
            None => write!(f, "{} (n/a)", self.title)?,
        }
        write!(f, " – {} ({})", self.role_label, self.media_type)
    }
}
