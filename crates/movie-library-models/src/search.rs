use serde::{Deserialize, Serialize};

/// One candidate hit from a provider title search. The `id` is the
/// provider's surrogate identifier used for the follow-up full fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub kind: Option<String>,
    pub year: Option<u32>,
}

impl SearchHit {
    /// A hit qualifies as a movie candidate when it carries a year and its
    /// kind, if present, is exactly "movie". TV series and episodes use
    /// other kinds and are excluded.
    pub fn qualifies_as_movie(&self) -> bool {
        self.year.is_some() && self.kind.as_deref().map_or(true, |k| k == "movie")
    }
}
