//! Movie models.
//!
//! [`MovieRow`] is what a query row decodes into; [`MovieResult`] is what the
//! client receives.

use serde::{Deserialize, Serialize};

/// A movie as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Movie {
    /// Release year.
    pub released: i64,
    /// Title, left out of the JSON when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
}

/// Wraps a [`Movie`] so each array element serializes as `{"movie": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MovieResult {
    pub movie: Movie,
}

/// One row of `RETURN movie.title as title, movie.released as released`.
///
/// A null title is tolerated; `released` must be an integer.
#[derive(Debug, Deserialize)]
pub struct MovieRow {
    pub title: Option<String>,
    pub released: i64,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Self {
            released: row.released,
            title: row.title.unwrap_or_default(),
        }
    }
}

impl From<Movie> for MovieResult {
    fn from(movie: Movie) -> Self {
        Self { movie }
    }
}

impl From<MovieRow> for MovieResult {
    fn from(row: MovieRow) -> Self {
        Movie::from(row).into()
    }
}
