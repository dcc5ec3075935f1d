use crate::error::{Result, StoreError};
use movie_library_models::MovieRecord;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS movies (
    title TEXT NOT NULL,
    year INTEGER NOT NULL,
    runtime_minutes INTEGER,
    genres TEXT,
    director TEXT,
    plot TEXT,
    poster_url TEXT,
    imdb_rating TEXT,
    imdb_votes TEXT,
    watched BOOLEAN NOT NULL DEFAULT 0,
    notes TEXT
)";

const ALL_COLUMNS: &str = "title, year, runtime_minutes, genres, director, plot, \
                           poster_url, imdb_rating, imdb_votes, watched, notes";

/// SQLite-backed movie library. Holds the single process-lifetime
/// connection; every mutating call commits before returning.
#[derive(Clone)]
pub struct MovieStore {
    pool: SqlitePool,
}

impl MovieStore {
    /// Open (creating if missing) the library database at `path`.
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::init_schema(&pool).await?;
        debug!("opened movie library at {}", path.display());

        Ok(Self { pool })
    }

    /// In-memory database, used by tests.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::init_schema(&pool).await?;
        Ok(Self { pool })
    }

    async fn init_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(SCHEMA).execute(pool).await?;
        Ok(())
    }

    /// Release the underlying connection. Idempotent.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Insert a record unless an existing row matches it on all nine
    /// provider-derived fields. `watched` and `notes` are not part of the
    /// comparison. `IS` instead of `=` so that absent fields compare equal.
    pub async fn create(&self, record: &MovieRecord) -> Result<()> {
        let existing = sqlx::query(
            "SELECT rowid FROM movies
             WHERE title = ? AND year = ? AND runtime_minutes IS ? AND genres IS ?
               AND director IS ? AND plot IS ? AND poster_url IS ?
               AND imdb_rating IS ? AND imdb_votes IS ?",
        )
        .bind(&record.title)
        .bind(record.year as i64)
        .bind(record.runtime_minutes.map(i64::from))
        .bind(&record.genres)
        .bind(&record.director)
        .bind(&record.plot)
        .bind(&record.poster_url)
        .bind(&record.imdb_rating)
        .bind(&record.imdb_votes)
        .fetch_optional(&self.pool)
        .await?;

        if existing.is_some() {
            return Err(StoreError::duplicate(&record.title));
        }

        sqlx::query(
            "INSERT INTO movies (title, year, runtime_minutes, genres, director, plot,
                                 poster_url, imdb_rating, imdb_votes, watched, notes)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, NULL)",
        )
        .bind(&record.title)
        .bind(record.year as i64)
        .bind(record.runtime_minutes.map(i64::from))
        .bind(&record.genres)
        .bind(&record.director)
        .bind(&record.plot)
        .bind(&record.poster_url)
        .bind(&record.imdb_rating)
        .bind(&record.imdb_votes)
        .execute(&self.pool)
        .await?;

        debug!("inserted \"{}\" ({})", record.title, record.year);
        Ok(())
    }

    /// Remove all rows with this exact title.
    pub async fn delete(&self, title: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM movies WHERE title = ?")
            .bind(title)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(title));
        }
        Ok(())
    }

    /// First row with this exact title, in storage order.
    pub async fn find_one(&self, title: &str) -> Result<MovieRecord> {
        let row = sqlx::query(&format!(
            "SELECT {ALL_COLUMNS} FROM movies WHERE title = ? ORDER BY rowid LIMIT 1"
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(title))?;

        Ok(record_from_row(&row))
    }

    pub async fn find_all(&self) -> Result<Vec<MovieRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {ALL_COLUMNS} FROM movies ORDER BY rowid"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    /// Case-sensitive substring match on the title. `instr` rather than
    /// `LIKE`: SQLite's LIKE is ASCII-case-insensitive.
    pub async fn find_by_title_substring(&self, needle: &str) -> Result<Vec<MovieRecord>> {
        self.find_by_substring("title", needle).await
    }

    pub async fn find_by_director_substring(&self, needle: &str) -> Result<Vec<MovieRecord>> {
        self.find_by_substring("director", needle).await
    }

    pub async fn find_by_genre_substring(&self, needle: &str) -> Result<Vec<MovieRecord>> {
        self.find_by_substring("genres", needle).await
    }

    async fn find_by_substring(&self, column: &str, needle: &str) -> Result<Vec<MovieRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {ALL_COLUMNS} FROM movies WHERE instr({column}, ?) > 0 ORDER BY rowid"
        ))
        .bind(needle)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    pub async fn find_by_year(&self, year: u32) -> Result<Vec<MovieRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {ALL_COLUMNS} FROM movies WHERE year = ? ORDER BY rowid"
        ))
        .bind(year as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    pub async fn set_watched(&self, title: &str, watched: bool) -> Result<()> {
        let result = sqlx::query("UPDATE movies SET watched = ? WHERE title = ?")
            .bind(watched)
            .bind(title)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(title));
        }
        Ok(())
    }

    pub async fn set_notes(&self, title: &str, notes: &str) -> Result<()> {
        let result = sqlx::query("UPDATE movies SET notes = ? WHERE title = ?")
            .bind(notes)
            .bind(title)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(title));
        }
        Ok(())
    }

    /// Irreversibly drop the whole movies table. Confirmation is the
    /// caller's responsibility.
    pub async fn drop_all(&self) -> Result<()> {
        sqlx::query("DROP TABLE IF EXISTS movies")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn record_from_row(row: &SqliteRow) -> MovieRecord {
    MovieRecord {
        title: row.get("title"),
        year: row.get::<i64, _>("year") as u32,
        runtime_minutes: row
            .get::<Option<i64>, _>("runtime_minutes")
            .map(|m| m as u32),
        genres: row.get("genres"),
        director: row.get("director"),
        plot: row.get("plot"),
        poster_url: row.get("poster_url"),
        imdb_rating: row.get("imdb_rating"),
        imdb_votes: row.get("imdb_votes"),
        watched: row.get("watched"),
        notes: row.get("notes"),
    }
}
