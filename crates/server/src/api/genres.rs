//! Genre API handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use cinedex_core::Genre;

use super::ErrorResponse;
use crate::state::AppState;

/// GET /genres
///
/// All registered genres, sorted by name.
pub async fn list_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Genre>>, impl IntoResponse> {
    match state.catalog().list_genres() {
        Ok(genres) => Ok(Json(genres)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}
