//! Movie API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use cinedex_core::{
    validate_new_movie, validate_patch, CatalogError, FieldError, Identity, Movie, MovieFilter,
    MoviePatch, NewMovie, SortField, SortOrder,
};

use super::{ErrorResponse, MessageResponse, ValidationErrorResponse};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Query parameters for listing movies.
///
/// Numeric parameters arrive as strings so a malformed value maps to a
/// per-field error instead of a generic deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListMoviesParams {
    pub sort_by: Option<String>,
    pub order_by: Option<String>,
    /// Comma-separated genre names; a movie must carry all of them.
    pub genres: Option<String>,
    pub search: Option<String>,
    pub start: Option<String>,
    pub length: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub movies: Vec<Movie>,
    #[serde(rename = "totalMovies")]
    pub total_movies: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateMovieBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMovieBody {
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub popularity: Option<i64>,
}

/// Build the filter from raw query parameters.
///
/// Unknown sort keywords and malformed numbers are rejected, never
/// silently defaulted.
fn build_filter(params: &ListMoviesParams) -> Result<MovieFilter, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut filter = MovieFilter::new();

    if let Some(ref sort_by) = params.sort_by {
        match SortField::parse(sort_by) {
            Some(field) => filter.sort_field = field,
            None => errors.push(FieldError::new(
                "sort_by",
                "sort_by must be one of id, popularity, director, name",
            )),
        }
    }

    if let Some(ref order_by) = params.order_by {
        match SortOrder::parse(order_by) {
            Some(order) => filter.sort_order = order,
            None => errors.push(FieldError::new(
                "order_by",
                "order_by must be one of asc, desc",
            )),
        }
    }

    if let Some(ref start) = params.start {
        match start.parse::<i64>() {
            Ok(start) if start >= 0 => filter.offset = start,
            _ => errors.push(FieldError::new(
                "start",
                "start must be a non-negative integer",
            )),
        }
    }

    if let Some(ref length) = params.length {
        match length.parse::<i64>() {
            Ok(length) if length >= 1 => filter.limit = length,
            _ => errors.push(FieldError::new(
                "length",
                "length must be a positive integer",
            )),
        }
    }

    if let Some(ref genres) = params.genres {
        filter.genres = genres
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Some(ref search) = params.search {
        if !search.is_empty() {
            filter.search = Some(search.clone());
        }
    }

    if errors.is_empty() {
        Ok(filter)
    } else {
        Err(errors)
    }
}

fn validation_failed(errors: Vec<FieldError>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ValidationErrorResponse { errors }),
    )
        .into_response()
}

fn store_failed(error: CatalogError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /movies
///
/// Filtered, sorted, paginated listing. `totalMovies` counts every match
/// regardless of the requested page.
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListMoviesParams>,
) -> Result<Json<MovieListResponse>, Response> {
    let filter = build_filter(&params).map_err(validation_failed)?;

    match state.catalog().list_movies(&filter) {
        Ok(page) => Ok(Json(MovieListResponse {
            movies: page.movies,
            total_movies: page.total,
        })),
        Err(e) => Err(store_failed(e)),
    }
}

/// POST /movies
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateMovieBody>,
) -> Result<(StatusCode, Json<Movie>), Response> {
    let movie = NewMovie {
        name: body.name,
        director: body.director,
        genres: body.genres,
        popularity: body.popularity,
    };

    let errors = validate_new_movie(&movie);
    if !errors.is_empty() {
        return Err(validation_failed(errors));
    }

    match state.catalog().create_movie(movie) {
        Ok(created) => {
            info!(id = created.id, name = %created.name, created_by = %identity.email, "movie created");
            Ok((StatusCode::CREATED, Json(created)))
        }
        Err(CatalogError::DuplicateName(name)) => Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!("A movie named '{}' already exists", name),
            }),
        )
            .into_response()),
        Err(e) => Err(store_failed(e)),
    }
}

/// PUT /movies/{id}
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateMovieBody>,
) -> Result<Json<Movie>, Response> {
    let patch = MoviePatch {
        director: body.director,
        genres: body.genres,
        popularity: body.popularity,
    };

    let errors = validate_patch(&patch);
    if !errors.is_empty() {
        return Err(validation_failed(errors));
    }

    match state.catalog().update_movie(id, &patch) {
        Ok(updated) => {
            info!(id, updated_by = %identity.email, "movie updated");
            Ok(Json(updated))
        }
        Err(CatalogError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Movie not found".to_string(),
            }),
        )
            .into_response()),
        Err(e) => Err(store_failed(e)),
    }
}

/// DELETE /movies/{id}
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, Response> {
    match state.catalog().delete_movie(id) {
        Ok(true) => {
            info!(id, deleted_by = %identity.email, "movie deleted");
            Ok(Json(MessageResponse {
                message: "Successfully deleted movie.".to_string(),
            }))
        }
        Ok(false) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Movie not found".to_string(),
            }),
        )
            .into_response()),
        Err(e) => Err(store_failed(e)),
    }
}
