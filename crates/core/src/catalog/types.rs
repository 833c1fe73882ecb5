//! Types for the movie catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A movie record as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Store-assigned identifier.
    pub id: i64,
    /// Movie name. Expected unique within the catalog.
    pub name: String,
    /// Director name.
    pub director: String,
    /// Genre names, duplicates collapsed, sorted.
    pub genres: Vec<String>,
    /// Popularity in [1, 99].
    pub popularity: i64,
    /// Derived from popularity, never set independently.
    pub score: f64,
}

/// Payload for creating a movie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMovie {
    pub name: String,
    pub director: String,
    pub genres: Vec<String>,
    pub popularity: i64,
}

/// Partial update for a movie. Absent fields are left untouched;
/// `name` is immutable after creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoviePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<i64>,
}

/// One page of search results together with the total match count.
///
/// `total` counts every movie matching the filter, ignoring offset/limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total: i64,
}

/// A genre registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
}

/// Field a movie listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Id,
    Popularity,
    Director,
    Name,
}

impl SortField {
    /// Parse the wire keyword. Unknown values are rejected, never defaulted.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(SortField::Id),
            "popularity" => Some(SortField::Popularity),
            "director" => Some(SortField::Director),
            "name" => Some(SortField::Name),
            _ => None,
        }
    }

    /// Column name in the movies table.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Popularity => "popularity",
            SortField::Director => "director",
            SortField::Name => "name",
        }
    }
}

/// Sort direction for a movie listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse the wire keyword. Unknown values are rejected, never defaulted.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    /// SQL keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filter, sort and pagination descriptor for a movie listing.
///
/// A movie matches when it carries ALL genres in `genres` (conjunctive) and,
/// if `search` is set, its name or director contains the text
/// case-insensitively. An empty filter matches every movie.
#[derive(Debug, Clone)]
pub struct MovieFilter {
    /// Required genres. Empty means no genre requirement.
    pub genres: Vec<String>,
    /// Substring matched against name OR director.
    pub search: Option<String>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    /// Rows to skip.
    pub offset: i64,
    /// Maximum page length.
    pub limit: i64,
}

impl MovieFilter {
    /// Create a filter with defaults: sort by id ascending, first 20 rows.
    pub fn new() -> Self {
        Self {
            genres: Vec::new(),
            search: None,
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            offset: 0,
            limit: 20,
        }
    }

    /// Require all of the given genres.
    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }

    /// Match name or director against a substring.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Set sort field and direction.
    pub fn with_sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_field = field;
        self.sort_order = order;
        self
    }

    /// Set pagination offset.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// Set page length.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for MovieFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Movie not found: {0}")]
    NotFound(i64),

    #[error("A movie named '{0}' already exists")]
    DuplicateName(String),
}

/// Score derived from popularity: 87 -> 8.7.
pub fn derived_score(popularity: i64) -> f64 {
    popularity as f64 / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_parse() {
        assert_eq!(SortField::parse("id"), Some(SortField::Id));
        assert_eq!(SortField::parse("popularity"), Some(SortField::Popularity));
        assert_eq!(SortField::parse("director"), Some(SortField::Director));
        assert_eq!(SortField::parse("name"), Some(SortField::Name));
        assert_eq!(SortField::parse("year"), None);
        assert_eq!(SortField::parse("ID"), None);
        assert_eq!(SortField::parse(""), None);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("desc"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("descending"), None);
        assert_eq!(SortOrder::parse("ASC"), None);
    }

    #[test]
    fn test_filter_defaults() {
        let filter = MovieFilter::new();
        assert!(filter.genres.is_empty());
        assert!(filter.search.is_none());
        assert_eq!(filter.sort_field, SortField::Id);
        assert_eq!(filter.sort_order, SortOrder::Asc);
        assert_eq!(filter.offset, 0);
        assert_eq!(filter.limit, 20);
    }

    #[test]
    fn test_filter_builder() {
        let filter = MovieFilter::new()
            .with_genres(vec!["Sci-Fi".to_string(), "Thriller".to_string()])
            .with_search("nolan")
            .with_sort(SortField::Popularity, SortOrder::Desc)
            .with_offset(40)
            .with_limit(10);

        assert_eq!(filter.genres.len(), 2);
        assert_eq!(filter.search.as_deref(), Some("nolan"));
        assert_eq!(filter.sort_field, SortField::Popularity);
        assert_eq!(filter.sort_order, SortOrder::Desc);
        assert_eq!(filter.offset, 40);
        assert_eq!(filter.limit, 10);
    }

    #[test]
    fn test_derived_score() {
        assert_eq!(derived_score(87), 8.7);
        assert_eq!(derived_score(1), 0.1);
        assert_eq!(derived_score(99), 9.9);
        assert_eq!(derived_score(50), 5.0);
    }

    #[test]
    fn test_movie_patch_absent_fields_deserialize_as_none() {
        let patch: MoviePatch = serde_json::from_str(r#"{"popularity": 42}"#).unwrap();
        assert!(patch.director.is_none());
        assert!(patch.genres.is_none());
        assert_eq!(patch.popularity, Some(42));
    }

    #[test]
    fn test_movie_serialization() {
        let movie = Movie {
            id: 7,
            name: "Inception".to_string(),
            director: "Christopher Nolan".to_string(),
            genres: vec!["Sci-Fi".to_string(), "Thriller".to_string()],
            popularity: 87,
            score: 8.7,
        };

        let json = serde_json::to_string(&movie).unwrap();
        let parsed: Movie = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, movie);
    }
}
