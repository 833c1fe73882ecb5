//! Test doubles for exercising failure paths.
//!
//! Real store behavior is covered by the in-memory SQLite stores; these
//! doubles exist to script failures the SQLite implementations cannot
//! produce on demand.

mod failing_stores;

pub use failing_stores::FailingGenreStore;
