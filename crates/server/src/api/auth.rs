//! Authentication API handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use cinedex_core::{verify_password, FieldError, Role, UserStore};

use super::{ErrorResponse, ValidationErrorResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub role: Role,
}

fn validate_login(body: &LoginBody) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if body.email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email must be specified"));
    } else if !body.email.contains('@') {
        errors.push(FieldError::new(
            "email",
            "Email must be a valid email address",
        ));
    }

    if body.password.is_empty() {
        errors.push(FieldError::new("password", "Password must be specified."));
    }

    errors
}

fn invalid_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "Invalid credentials".to_string(),
        }),
    )
        .into_response()
}

/// POST /auth/login
///
/// Verifies the password digest and issues a signed, time-bounded token.
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, Response> {
    let errors = validate_login(&body);
    if !errors.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ValidationErrorResponse { errors }),
        )
            .into_response());
    }

    let user = match state.users().find_by_email(&body.email) {
        Ok(Some(user)) => user,
        Ok(None) => return Err(invalid_credentials()),
        Err(e) => {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response());
        }
    };

    if !verify_password(&body.password, &user.password_sha256) {
        return Err(invalid_credentials());
    }

    let token = match state.authenticator().issue(&user.email, user.role) {
        Ok(token) => token,
        Err(e) => {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response());
        }
    };

    info!(email = %user.email, "login succeeded");

    Ok(Json(LoginResponse {
        token,
        email: user.email,
        role: user.role,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_login_ok() {
        let body = LoginBody {
            email: "admin@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(validate_login(&body).is_empty());
    }

    #[test]
    fn test_validate_login_missing_email() {
        let body = LoginBody {
            email: String::new(),
            password: "secret".to_string(),
        };
        let errors = validate_login(&body);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn test_validate_login_malformed_email() {
        let body = LoginBody {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        let errors = validate_login(&body);
        assert_eq!(errors[0].message, "Email must be a valid email address");
    }

    #[test]
    fn test_validate_login_missing_password() {
        let body = LoginBody {
            email: "admin@example.com".to_string(),
            password: String::new(),
        };
        let errors = validate_login(&body);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "password");
    }
}
