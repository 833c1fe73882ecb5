pub mod auth;
pub mod genres;
pub mod handlers;
pub mod middleware;
pub mod movies;
pub mod routes;

pub use routes::create_router;

use cinedex_core::FieldError;
use serde::Serialize;

/// Generic error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Per-field validation error body.
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

/// Success message body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
