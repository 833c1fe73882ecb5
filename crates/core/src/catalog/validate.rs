//! Field-level validation for movie writes.
//!
//! Handlers run these before the catalog service is invoked; the service
//! assumes malformed input has already been rejected.

use super::{FieldError, MoviePatch, NewMovie};

/// Popularity bounds, inclusive.
pub const POPULARITY_MIN: i64 = 1;
pub const POPULARITY_MAX: i64 = 99;

/// Validate a create payload. Returns one error per offending field.
pub fn validate_new_movie(movie: &NewMovie) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if movie.name.trim().is_empty() {
        errors.push(FieldError::new("name", "name must not be empty"));
    }
    if movie.director.trim().is_empty() {
        errors.push(FieldError::new("director", "director must not be empty"));
    }
    errors.extend(validate_genres(&movie.genres));
    errors.extend(validate_popularity(movie.popularity));

    errors
}

/// Validate a patch. Only fields present in the patch are checked.
pub fn validate_patch(patch: &MoviePatch) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(ref director) = patch.director {
        if director.trim().is_empty() {
            errors.push(FieldError::new("director", "director must not be empty"));
        }
    }
    if let Some(ref genres) = patch.genres {
        errors.extend(validate_genres(genres));
    }
    if let Some(popularity) = patch.popularity {
        errors.extend(validate_popularity(popularity));
    }

    errors
}

fn validate_genres(genres: &[String]) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if genres.is_empty() {
        errors.push(FieldError::new(
            "genres",
            "genres must contain at least one genre",
        ));
    } else if genres.iter().any(|g| g.trim().is_empty()) {
        errors.push(FieldError::new("genres", "genre names must not be empty"));
    }

    errors
}

fn validate_popularity(popularity: i64) -> Vec<FieldError> {
    if !(POPULARITY_MIN..=POPULARITY_MAX).contains(&popularity) {
        vec![FieldError::new(
            "popularity",
            format!(
                "popularity must be between {} and {}",
                POPULARITY_MIN, POPULARITY_MAX
            ),
        )]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_movie() -> NewMovie {
        NewMovie {
            name: "Inception".to_string(),
            director: "Christopher Nolan".to_string(),
            genres: vec!["Sci-Fi".to_string()],
            popularity: 87,
        }
    }

    #[test]
    fn test_valid_movie_passes() {
        assert!(validate_new_movie(&valid_movie()).is_empty());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut movie = valid_movie();
        movie.name = "   ".to_string();
        let errors = validate_new_movie(&movie);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_empty_director_rejected() {
        let mut movie = valid_movie();
        movie.director = String::new();
        let errors = validate_new_movie(&movie);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "director");
    }

    #[test]
    fn test_empty_genres_rejected() {
        let mut movie = valid_movie();
        movie.genres.clear();
        let errors = validate_new_movie(&movie);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "genres");
    }

    #[test]
    fn test_blank_genre_name_rejected() {
        let mut movie = valid_movie();
        movie.genres.push("  ".to_string());
        let errors = validate_new_movie(&movie);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "genres");
    }

    #[test]
    fn test_popularity_bounds() {
        for bad in [0, -5, 100, 1000] {
            let mut movie = valid_movie();
            movie.popularity = bad;
            let errors = validate_new_movie(&movie);
            assert_eq!(errors.len(), 1, "popularity {} should be rejected", bad);
            assert_eq!(errors[0].field, "popularity");
        }
        for good in [1, 50, 99] {
            let mut movie = valid_movie();
            movie.popularity = good;
            assert!(validate_new_movie(&movie).is_empty());
        }
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let movie = NewMovie {
            name: String::new(),
            director: String::new(),
            genres: Vec::new(),
            popularity: 0,
        };
        let errors = validate_new_movie(&movie);
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_empty_patch_passes() {
        assert!(validate_patch(&MoviePatch::default()).is_empty());
    }

    #[test]
    fn test_patch_checks_only_present_fields() {
        let patch = MoviePatch {
            popularity: Some(150),
            ..Default::default()
        };
        let errors = validate_patch(&patch);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "popularity");
    }

    #[test]
    fn test_patch_rejects_empty_genre_list() {
        let patch = MoviePatch {
            genres: Some(Vec::new()),
            ..Default::default()
        };
        let errors = validate_patch(&patch);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "genres");
    }
}
