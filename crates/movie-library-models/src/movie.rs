use serde::{Deserialize, Serialize};

/// Canonical movie record as stored in the library. Provider-derived
/// fields with no resolvable value are `None`, never an empty string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    pub year: u32,
    pub runtime_minutes: Option<u32>,
    /// Comma-joined genre list, provider order preserved.
    pub genres: Option<String>,
    /// Comma-joined director names, provider order preserved.
    pub director: Option<String>,
    pub plot: Option<String>,
    pub poster_url: Option<String>,
    /// Kept as the provider's decimal string, not a parsed float.
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    pub watched: bool,
    /// User-authored, settable only after creation.
    pub notes: Option<String>,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>, year: u32) -> Self {
        Self {
            title: title.into(),
            year,
            runtime_minutes: None,
            genres: None,
            director: None,
            plot: None,
            poster_url: None,
            imdb_rating: None,
            imdb_votes: None,
            watched: false,
            notes: None,
        }
    }
}
