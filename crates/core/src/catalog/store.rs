//! Storage traits for movies and the genre registry.

use std::collections::BTreeSet;

use super::{CatalogError, Genre, Movie, MovieFilter, MoviePage, MoviePatch, NewMovie};

/// Trait for movie storage backends.
pub trait MovieStore: Send + Sync {
    /// Execute a filtered, sorted, paginated read.
    ///
    /// Returns the page and the total match count from one query plan, so
    /// the two cannot disagree under concurrent writes. `total` ignores
    /// offset/limit; an offset past the end yields an empty page with the
    /// true total.
    fn search(&self, filter: &MovieFilter) -> Result<MoviePage, CatalogError>;

    /// Get a movie by id.
    fn get(&self, id: i64) -> Result<Option<Movie>, CatalogError>;

    /// Look up a movie by exact name.
    fn find_by_name(&self, name: &str) -> Result<Option<Movie>, CatalogError>;

    /// Insert a new movie, deriving its score from popularity.
    ///
    /// Duplicate genre names are collapsed. Returns the stored record with
    /// its assigned id.
    fn insert(&self, movie: &NewMovie) -> Result<Movie, CatalogError>;

    /// Apply a partial update. Fields absent from the patch are untouched;
    /// a popularity change recomputes the score. Fails with `NotFound` if
    /// the id does not resolve.
    fn update(&self, id: i64, patch: &MoviePatch) -> Result<Movie, CatalogError>;

    /// Delete a movie. Returns true if a record was removed, false if the
    /// id was already absent.
    fn delete(&self, id: i64) -> Result<bool, CatalogError>;
}

/// Trait for the genre registry.
///
/// The registry only grows: genres are inserted when first referenced by a
/// movie write and never removed.
pub trait GenreStore: Send + Sync {
    /// All registered genre names.
    fn names(&self) -> Result<BTreeSet<String>, CatalogError>;

    /// Register names not yet present. Already-registered names are left
    /// alone. Returns the number of newly inserted genres.
    fn insert_missing(&self, names: &[String]) -> Result<u32, CatalogError>;

    /// All genres, sorted by name.
    fn list(&self) -> Result<Vec<Genre>, CatalogError>;
}
