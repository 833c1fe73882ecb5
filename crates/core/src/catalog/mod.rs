//! Movie catalog - records, genre registry, and the query/mutation engine.
//!
//! Reads flow through [`MovieStore::search`], which executes filter, sort,
//! pagination and total count as one query plan. Writes flow through
//! [`CatalogService`], which reconciles the genre registry before touching
//! movie records.

mod service;
mod sqlite;
mod store;
mod types;
mod validate;

pub use service::CatalogService;
pub use sqlite::{SqliteGenreStore, SqliteMovieStore};
pub use store::{GenreStore, MovieStore};
pub use types::*;
pub use validate::{validate_new_movie, validate_patch, POPULARITY_MAX, POPULARITY_MIN};
