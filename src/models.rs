use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A movie as returned by the catalog service. Immutable once fetched; the
/// same shape is persisted verbatim in the favorites list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub overview: String,
    pub vote_average: f32,
    pub vote_count: u32,
    pub popularity: f32,
    pub runtime: Option<u32>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    pub original_language: String,
    // Recommendation summaries omit genres entirely.
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Which artwork the detail screen leads with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverType {
    Poster,
    Backdrop,
}

/// The catalog sends `""` (not null) for movies without a release date.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()))
}
