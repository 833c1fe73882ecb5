//! Catalog mutations and genre reconciliation.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info};

use super::{
    CatalogError, Genre, GenreStore, Movie, MovieFilter, MoviePage, MoviePatch, MovieStore,
    NewMovie,
};

/// Mutation and query front for the movie catalog.
///
/// Wraps the movie store and the genre registry: every write that carries
/// genre names first reconciles the registry, so any name referenced by a
/// movie ends up registered. The registry only grows; deleting or editing a
/// movie never removes genres.
pub struct CatalogService {
    movies: Arc<dyn MovieStore>,
    genres: Arc<dyn GenreStore>,
}

impl CatalogService {
    pub fn new(movies: Arc<dyn MovieStore>, genres: Arc<dyn GenreStore>) -> Self {
        Self { movies, genres }
    }

    /// Filtered, sorted, paginated listing with total match count.
    pub fn list_movies(&self, filter: &MovieFilter) -> Result<MoviePage, CatalogError> {
        self.movies.search(filter)
    }

    /// Create a movie.
    ///
    /// Fails with `DuplicateName` when a movie with the same name already
    /// exists (checked by a lookup preceding the insert). New genre names
    /// are registered before the movie is written.
    pub fn create_movie(&self, movie: NewMovie) -> Result<Movie, CatalogError> {
        if self.movies.find_by_name(&movie.name)?.is_some() {
            return Err(CatalogError::DuplicateName(movie.name));
        }

        self.reconcile_genres(&movie.genres)?;

        let created = self.movies.insert(&movie)?;
        info!(id = created.id, name = %created.name, "created movie");
        Ok(created)
    }

    /// Apply a partial update. Absent patch fields are left untouched; a
    /// popularity change recomputes the score. When the patch carries
    /// genres, reconciliation runs before the movie is touched.
    pub fn update_movie(&self, id: i64, patch: &MoviePatch) -> Result<Movie, CatalogError> {
        if let Some(ref genres) = patch.genres {
            self.reconcile_genres(genres)?;
        }

        let updated = self.movies.update(id, patch)?;
        info!(id, "updated movie");
        Ok(updated)
    }

    /// Delete a movie. Returns true when a record was removed, false when
    /// the id was already absent (the caller maps that to not-found).
    pub fn delete_movie(&self, id: i64) -> Result<bool, CatalogError> {
        let deleted = self.movies.delete(id)?;
        if deleted {
            info!(id, "deleted movie");
        }
        Ok(deleted)
    }

    /// All registered genres, sorted by name.
    pub fn list_genres(&self) -> Result<Vec<Genre>, CatalogError> {
        self.genres.list()
    }

    /// Register any requested genre names missing from the registry.
    fn reconcile_genres(&self, requested: &[String]) -> Result<(), CatalogError> {
        let existing = self.genres.names()?;
        let missing: Vec<String> = requested
            .iter()
            .filter(|name| !existing.contains(*name))
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        let inserted = self.genres.insert_missing(&missing)?;
        debug!(count = inserted, "registered new genres");
        Ok(())
    }
}
