//! Maps a raw provider record into the canonical [`MovieRecord`] shape.
//!
//! The provider keys the same attribute under several alternate names
//! depending on how the record was produced, so every field is resolved
//! independently through a fixed key-precedence chain. A field with no
//! resolvable value stays absent; it is never stored as an empty string.

use crate::raw::RawRecord;
use movie_library_models::MovieRecord;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("provider record is missing required field `{0}`")]
    MissingField(&'static str),
}

/// Pure transformation of one raw provider record into a [`MovieRecord`]
/// with `watched = false` and no notes. `title` and `year` are required;
/// everything else degrades to absent.
pub fn normalize_record(raw: &RawRecord) -> Result<MovieRecord, NormalizeError> {
    let title = raw
        .get("title")
        .and_then(Value::as_str)
        .ok_or(NormalizeError::MissingField("title"))?
        .to_string();
    let year = raw
        .get("year")
        .and_then(as_u32)
        .ok_or(NormalizeError::MissingField("year"))?;

    Ok(MovieRecord {
        title,
        year,
        runtime_minutes: resolve_runtime(raw),
        genres: resolve_genres(raw),
        director: resolve_director(raw),
        plot: resolve_plot(raw),
        poster_url: resolve_poster(raw),
        imdb_rating: resolve_decimal_string(raw, "rating"),
        imdb_votes: resolve_decimal_string(raw, "votes"),
        watched: false,
        notes: None,
    })
}

/// Accepts both JSON numbers and numeric strings.
fn as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// The provider wraps some scalar attributes in single-element lists.
fn first_or_self(value: &Value) -> &Value {
    value.as_array().and_then(|a| a.first()).unwrap_or(value)
}

/// `runtime[0]`, then `runtimes[0]`, then absent.
fn resolve_runtime(raw: &RawRecord) -> Option<u32> {
    raw.get("runtime")
        .or_else(|| raw.get("runtimes"))
        .map(first_or_self)
        .and_then(as_u32)
}

/// `genre` (already comma-joined), then `genres` joined with ", ".
fn resolve_genres(raw: &RawRecord) -> Option<String> {
    if let Some(joined) = raw.get("genre").and_then(Value::as_str) {
        return Some(joined.to_string());
    }

    let genres: Vec<&str> = raw
        .get("genres")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .collect();
    if genres.is_empty() {
        None
    } else {
        Some(genres.join(", "))
    }
}

/// `directors` (list of objects with a `name`, joined with ", "), then
/// `director[0].name`.
fn resolve_director(raw: &RawRecord) -> Option<String> {
    if let Some(list) = raw.get("directors").and_then(Value::as_array) {
        let names: Vec<&str> = list
            .iter()
            .filter_map(|entry| entry.get("name").and_then(Value::as_str))
            .collect();
        if !names.is_empty() {
            return Some(names.join(", "));
        }
    }

    raw.get("director")
        .map(first_or_self)
        .and_then(|entry| entry.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// `plot outline` (scalar), then `plot[0]`.
fn resolve_plot(raw: &RawRecord) -> Option<String> {
    if let Some(outline) = raw.get("plot outline").and_then(Value::as_str) {
        return Some(outline.to_string());
    }

    raw.get("plot")
        .map(first_or_self)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// `cover`, then `cover url`; the URL is truncated to the high-resolution
/// variant when the provider's size-suffix scheme is present.
fn resolve_poster(raw: &RawRecord) -> Option<String> {
    raw.get("cover")
        .or_else(|| raw.get("cover url"))
        .and_then(Value::as_str)
        .map(truncate_poster_url)
}

/// Cuts the thumbnail size suffix: everything after the last `@` is
/// dropped, keeping the `@` itself. URLs without an `@` are kept verbatim
/// rather than treated as an error, so the operation is idempotent.
fn truncate_poster_url(url: &str) -> String {
    match url.rfind('@') {
        Some(index) => url[..=index].to_string(),
        None => url.to_string(),
    }
}

/// Ratings and vote counts are stored as the provider's decimal string,
/// not parsed into numbers.
fn resolve_decimal_string(raw: &RawRecord, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawRecord {
        match value {
            Value::Object(map) => RawRecord::new(map),
            _ => panic!("fixture must be a JSON object"),
        }
    }

    #[test]
    fn test_missing_title_is_hard_failure() {
        let record = raw(json!({ "year": 1994 }));
        assert_eq!(
            normalize_record(&record),
            Err(NormalizeError::MissingField("title"))
        );
    }

    #[test]
    fn test_missing_year_is_hard_failure() {
        let record = raw(json!({ "title": "Pi" }));
        assert_eq!(
            normalize_record(&record),
            Err(NormalizeError::MissingField("year"))
        );
    }

    #[test]
    fn test_missing_runtime_keys_resolve_to_absent() {
        let record = raw(json!({ "title": "Pi", "year": 1998 }));
        let movie = normalize_record(&record).unwrap();
        assert_eq!(movie.runtime_minutes, None);
        assert_eq!(movie.genres, None);
        assert_eq!(movie.director, None);
        assert_eq!(movie.plot, None);
        assert_eq!(movie.poster_url, None);
        assert_eq!(movie.imdb_rating, None);
        assert_eq!(movie.imdb_votes, None);
        assert!(!movie.watched);
        assert_eq!(movie.notes, None);
    }

    #[test]
    fn test_runtime_prefers_runtime_over_runtimes() {
        let record = raw(json!({
            "title": "Heat",
            "year": 1995,
            "runtime": ["170"],
            "runtimes": ["90"],
        }));
        let movie = normalize_record(&record).unwrap();
        assert_eq!(movie.runtime_minutes, Some(170));
    }

    #[test]
    fn test_runtimes_fallback_accepts_numbers() {
        let record = raw(json!({
            "title": "Heat",
            "year": 1995,
            "runtimes": [170],
        }));
        let movie = normalize_record(&record).unwrap();
        assert_eq!(movie.runtime_minutes, Some(170));
    }

    #[test]
    fn test_genres_list_is_joined_in_order() {
        let record = raw(json!({
            "title": "The Godfather",
            "year": 1972,
            "genres": ["Drama", "Crime"],
        }));
        let movie = normalize_record(&record).unwrap();
        assert_eq!(movie.genres.as_deref(), Some("Drama, Crime"));
    }

    #[test]
    fn test_scalar_genre_takes_precedence() {
        let record = raw(json!({
            "title": "The Godfather",
            "year": 1972,
            "genre": "Crime, Drama",
            "genres": ["Drama"],
        }));
        let movie = normalize_record(&record).unwrap();
        assert_eq!(movie.genres.as_deref(), Some("Crime, Drama"));
    }

    #[test]
    fn test_directors_list_takes_precedence_over_singular() {
        let record = raw(json!({
            "title": "The Matrix",
            "year": 1999,
            "directors": [{ "name": "Lana Wachowski" }, { "name": "Lilly Wachowski" }],
            "director": [{ "name": "Somebody Else" }],
        }));
        let movie = normalize_record(&record).unwrap();
        assert_eq!(
            movie.director.as_deref(),
            Some("Lana Wachowski, Lilly Wachowski")
        );
    }

    #[test]
    fn test_singular_director_fallback() {
        let record = raw(json!({
            "title": "Jaws",
            "year": 1975,
            "director": [{ "name": "Steven Spielberg" }],
        }));
        let movie = normalize_record(&record).unwrap();
        assert_eq!(movie.director.as_deref(), Some("Steven Spielberg"));
    }

    #[test]
    fn test_empty_directors_list_falls_back() {
        let record = raw(json!({
            "title": "Jaws",
            "year": 1975,
            "directors": [],
            "director": [{ "name": "Steven Spielberg" }],
        }));
        let movie = normalize_record(&record).unwrap();
        assert_eq!(movie.director.as_deref(), Some("Steven Spielberg"));
    }

    #[test]
    fn test_plot_outline_takes_precedence() {
        let record = raw(json!({
            "title": "Alien",
            "year": 1979,
            "plot outline": "Short outline.",
            "plot": ["Long first plot entry."],
        }));
        let movie = normalize_record(&record).unwrap();
        assert_eq!(movie.plot.as_deref(), Some("Short outline."));
    }

    #[test]
    fn test_plot_list_fallback_uses_first_entry() {
        let record = raw(json!({
            "title": "Alien",
            "year": 1979,
            "plot": ["First.", "Second."],
        }));
        let movie = normalize_record(&record).unwrap();
        assert_eq!(movie.plot.as_deref(), Some("First."));
    }

    #[test]
    fn test_poster_is_truncated_at_last_size_marker() {
        let record = raw(json!({
            "title": "Se7en",
            "year": 1995,
            "cover": "https://m.media-amazon.com/images/M/abc@@._V1_SX300.jpg",
        }));
        let movie = normalize_record(&record).unwrap();
        assert_eq!(
            movie.poster_url.as_deref(),
            Some("https://m.media-amazon.com/images/M/abc@@")
        );
    }

    #[test]
    fn test_poster_truncation_is_idempotent() {
        let already = "https://m.media-amazon.com/images/M/abc@@";
        assert_eq!(truncate_poster_url(already), already);
    }

    #[test]
    fn test_poster_without_marker_is_kept_verbatim() {
        let plain = "https://m.media-amazon.com/images/M/plain.jpg";
        assert_eq!(truncate_poster_url(plain), plain);
    }

    #[test]
    fn test_cover_url_fallback() {
        let record = raw(json!({
            "title": "Se7en",
            "year": 1995,
            "cover url": "https://m.media-amazon.com/images/M/xyz@._V1_SX100.jpg",
        }));
        let movie = normalize_record(&record).unwrap();
        assert_eq!(
            movie.poster_url.as_deref(),
            Some("https://m.media-amazon.com/images/M/xyz@")
        );
    }

    #[test]
    fn test_rating_and_votes_keep_decimal_string_form() {
        let record = raw(json!({
            "title": "The Shawshank Redemption",
            "year": 1994,
            "rating": 9.3,
            "votes": 2800000,
        }));
        let movie = normalize_record(&record).unwrap();
        assert_eq!(movie.imdb_rating.as_deref(), Some("9.3"));
        assert_eq!(movie.imdb_votes.as_deref(), Some("2800000"));
    }

    #[test]
    fn test_year_accepts_numeric_string() {
        let record = raw(json!({ "title": "Pi", "year": "1998" }));
        let movie = normalize_record(&record).unwrap();
        assert_eq!(movie.year, 1998);
    }
}
