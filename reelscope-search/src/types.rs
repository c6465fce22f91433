//! Data types for movie search results and detail records.
//!
//! Field names follow the OMDb wire format through serde renames, so raw API
//! records deserialize straight into these types. Missing or `null` text
//! fields become empty strings instead of failing the whole page.

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel the API uses for a missing poster or field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Genre filter choices offered by the search screen as `(label, value)`.
pub const GENRE_OPTIONS: &[(&str, &str)] = &[
    ("Action", "Action"),
    ("Comedy", "Comedy"),
    ("Drama", "Drama"),
    ("Romance", "Romance"),
    ("Horror", "Horror"),
    ("Sci-Fi", "Sci-Fi"),
    ("Thriller", "Thriller"),
    ("Adventure", "Adventure"),
];

/// Kind of title as reported in the `Type` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum MediaKind {
    /// Feature film.
    Movie,
    /// Whole series.
    Series,
    /// Single episode of a series.
    Episode,
    /// Absent or unrecognised type.
    #[default]
    Unknown,
}

impl MediaKind {
    /// Type filter choices offered by the search screen as `(label, value)`.
    pub const FILTER_OPTIONS: &[(&str, &str)] = &[
        ("Movie", "movie"),
        ("Series", "series"),
        ("Episode", "episode"),
    ];

    /// Wire value, empty for `Unknown`.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
            MediaKind::Episode => "episode",
            MediaKind::Unknown => "",
        }
    }
}

impl From<&str> for MediaKind {
    fn from(value: &str) -> Self {
        match value {
            "movie" => MediaKind::Movie,
            "series" => MediaKind::Series,
            "episode" => MediaKind::Episode,
            _ => MediaKind::Unknown,
        }
    }
}

impl From<Option<String>> for MediaKind {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(MediaKind::from).unwrap_or_default()
    }
}

impl From<MediaKind> for String {
    fn from(kind: MediaKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a search result page.
///
/// Identity is `imdb_id`. The API may repeat an entry across pages, so
/// accumulated lists are not guaranteed to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Display title.
    #[serde(rename = "Title", default, deserialize_with = "lenient_text")]
    pub title: String,
    /// Release year, or a range such as `2019–2021` for series.
    #[serde(rename = "Year", default, deserialize_with = "lenient_text")]
    pub year: String,
    /// Poster URL or the `N/A` sentinel.
    #[serde(rename = "Poster", default, deserialize_with = "lenient_text")]
    pub poster: String,
    /// Stable external identifier.
    #[serde(rename = "imdbID", default, deserialize_with = "lenient_text")]
    pub imdb_id: String,
    /// Movie, series or episode.
    #[serde(rename = "Type", default)]
    pub kind: MediaKind,
}

impl MovieSummary {
    /// Whether the poster field holds a usable URL.
    pub fn has_poster(&self) -> bool {
        !self.poster.is_empty() && self.poster != NOT_AVAILABLE
    }
}

/// Single rating source of a detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Rating source, e.g. `Rotten Tomatoes`.
    #[serde(rename = "Source", default, deserialize_with = "lenient_text")]
    pub source: String,
    /// Score as reported, e.g. `87%`.
    #[serde(rename = "Value", default, deserialize_with = "lenient_text")]
    pub value: String,
}

/// Full record for one title as returned by an `i=` lookup.
///
/// Replaced wholesale on every lookup, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    /// Display title.
    #[serde(rename = "Title", default, deserialize_with = "lenient_text")]
    pub title: String,
    /// Release year or range.
    #[serde(rename = "Year", default, deserialize_with = "lenient_text")]
    pub year: String,
    /// Certification, e.g. `PG-13`.
    #[serde(rename = "Rated", default, deserialize_with = "lenient_text")]
    pub rated: String,
    /// Release date.
    #[serde(rename = "Released", default, deserialize_with = "lenient_text")]
    pub released: String,
    /// Running time, e.g. `136 min`.
    #[serde(rename = "Runtime", default, deserialize_with = "lenient_text")]
    pub runtime: String,
    /// Comma separated genres.
    #[serde(rename = "Genre", default, deserialize_with = "lenient_text")]
    pub genre: String,
    /// Director names.
    #[serde(rename = "Director", default, deserialize_with = "lenient_text")]
    pub director: String,
    /// Writer names.
    #[serde(rename = "Writer", default, deserialize_with = "lenient_text")]
    pub writer: String,
    /// Main cast.
    #[serde(rename = "Actors", default, deserialize_with = "lenient_text")]
    pub actors: String,
    /// Short plot summary.
    #[serde(rename = "Plot", default, deserialize_with = "lenient_text")]
    pub plot: String,
    /// Spoken languages.
    #[serde(rename = "Language", default, deserialize_with = "lenient_text")]
    pub language: String,
    /// Production countries.
    #[serde(rename = "Country", default, deserialize_with = "lenient_text")]
    pub country: String,
    /// Awards summary.
    #[serde(rename = "Awards", default, deserialize_with = "lenient_text")]
    pub awards: String,
    /// Poster URL or `N/A`.
    #[serde(rename = "Poster", default, deserialize_with = "lenient_text")]
    pub poster: String,
    /// Per-source ratings.
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<Rating>,
    /// Metacritic score.
    #[serde(rename = "Metascore", default, deserialize_with = "lenient_text")]
    pub metascore: String,
    /// IMDb rating out of 10.
    #[serde(rename = "imdbRating", default, deserialize_with = "lenient_text")]
    pub imdb_rating: String,
    /// IMDb vote count.
    #[serde(rename = "imdbVotes", default, deserialize_with = "lenient_text")]
    pub imdb_votes: String,
    /// Stable external identifier.
    #[serde(rename = "imdbID", default, deserialize_with = "lenient_text")]
    pub imdb_id: String,
    /// Movie, series or episode.
    #[serde(rename = "Type", default)]
    pub kind: MediaKind,
    /// DVD release date.
    #[serde(rename = "DVD", default, deserialize_with = "lenient_text")]
    pub dvd: String,
    /// Box office takings.
    #[serde(rename = "BoxOffice", default, deserialize_with = "lenient_text")]
    pub box_office: String,
    /// Production company.
    #[serde(rename = "Production", default, deserialize_with = "lenient_text")]
    pub production: String,
    /// Official website or `N/A`.
    #[serde(rename = "Website", default, deserialize_with = "lenient_text")]
    pub website: String,
}

/// One labelled field of the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSection {
    /// Heading of the field.
    pub label: &'static str,
    /// Field text.
    pub content: String,
    /// Target opened when the field is activated.
    pub link: Option<String>,
}

impl DetailSection {
    fn text(label: &'static str, content: &str) -> Self {
        Self {
            label,
            content: content.to_string(),
            link: None,
        }
    }

    fn link(label: &'static str, content: &str, url: String) -> Self {
        Self {
            label,
            content: content.to_string(),
            link: Some(url),
        }
    }
}

impl MovieDetail {
    /// Projects the record onto its list-entry shape.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            title: self.title.clone(),
            year: self.year.clone(),
            poster: self.poster.clone(),
            imdb_id: self.imdb_id.clone(),
            kind: self.kind,
        }
    }

    /// Canonical IMDb page for this title.
    pub fn imdb_url(&self) -> String {
        format!("https://www.imdb.com/title/{}", self.imdb_id)
    }

    /// `Year | Genre | Runtime` line shown under the title.
    pub fn headline(&self) -> String {
        format!("{} | {} | {}", self.year, self.genre, self.runtime)
    }

    /// Fields of the detail view in display order.
    pub fn sections(&self) -> Vec<DetailSection> {
        vec![
            DetailSection::text("Plot", &self.plot),
            DetailSection::text("Director", &self.director),
            DetailSection::text("Cast", &self.actors),
            DetailSection::text("Box Office", &self.box_office),
            DetailSection::text("Awards", &self.awards),
            DetailSection::text("Production", &self.production),
            DetailSection::link("Website", &self.website, self.website.clone()),
            DetailSection::link("IMDB", &self.imdb_id, self.imdb_url()),
            DetailSection::text("IMDB Votes", &self.imdb_votes),
            DetailSection::text("IMDB Rating", &self.imdb_rating),
            DetailSection::text("Rated", &self.rated),
            DetailSection::text("Released", &self.released),
            DetailSection::text("Writer", &self.writer),
            DetailSection::text("Language", &self.language),
            DetailSection::text("Country", &self.country),
            DetailSection::text("DVD", &self.dvd),
            DetailSection::text("Metascore", &self.metascore),
            DetailSection::text("Type", self.kind.as_str()),
        ]
    }
}

/// Accepts strings, `null` and scalars for a text field.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
