//! Stores that fail on demand.

use std::collections::BTreeSet;

use crate::catalog::{CatalogError, Genre, GenreStore};

/// Genre registry whose every operation fails with a database error.
///
/// Used to verify that a reconciliation failure aborts the surrounding
/// write and surfaces as a store failure.
pub struct FailingGenreStore;

impl FailingGenreStore {
    pub fn new() -> Self {
        Self
    }

    fn error() -> CatalogError {
        CatalogError::Database("injected failure".to_string())
    }
}

impl Default for FailingGenreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GenreStore for FailingGenreStore {
    fn names(&self) -> Result<BTreeSet<String>, CatalogError> {
        Err(Self::error())
    }

    fn insert_missing(&self, _names: &[String]) -> Result<u32, CatalogError> {
        Err(Self::error())
    }

    fn list(&self) -> Result<Vec<Genre>, CatalogError> {
        Err(Self::error())
    }
}
