use movie_library_models::MovieRecord;

pub const DIVIDER_LINE: &str = "------------------------------";

/// The provider-derived fields, one line each; absent fields render as
/// "<Field> unavailable" rather than printing blank. Vote counts are
/// stored but never rendered.
pub fn provider_lines(movie: &MovieRecord) -> Vec<String> {
    let mut lines = vec![
        format!("Title: {}", movie.title),
        format!("Year Released: {}", movie.year),
    ];

    lines.push(match movie.runtime_minutes {
        Some(minutes) => format!("Runtime: {} minutes", minutes),
        None => "Runtime unavailable".to_string(),
    });
    lines.push(match &movie.genres {
        Some(genres) => format!("Genres: {}", genres),
        None => "Genres unavailable".to_string(),
    });
    lines.push(match &movie.director {
        Some(director) => format!("Director(s): {}", director),
        None => "Director(s) unavailable".to_string(),
    });
    lines.push(match &movie.plot {
        Some(plot) => format!("Synopsis: {}", plot),
        None => "Synopsis unavailable".to_string(),
    });
    lines.push(match &movie.poster_url {
        Some(poster) => format!("Poster Image: {}", poster),
        None => "Poster Image unavailable".to_string(),
    });
    lines.push(match &movie.imdb_rating {
        Some(rating) => format!("Rating: {}/10", rating),
        None => "Rating unavailable".to_string(),
    });

    lines
}

/// Full library rendering: provider fields plus watched state and notes.
pub fn record_lines(movie: &MovieRecord) -> Vec<String> {
    let mut lines = provider_lines(movie);
    lines.push(format!("Watched: {}", movie.watched));
    lines.push(match &movie.notes {
        Some(notes) => format!("Notes: {}", notes),
        None => "Notes unavailable".to_string(),
    });
    lines
}
