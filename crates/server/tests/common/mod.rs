//! Common test utilities for in-process API testing.
//!
//! Builds the full router against in-memory stores so tests exercise the
//! real handler/middleware/service stack without a listening socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use cinedex_core::{
    hash_password, AuthConfig, CatalogService, Config, DatabaseConfig, GenreStore,
    JwtAuthenticator, NewUser, Role, ServerConfig, SqliteGenreStore, SqliteMovieStore,
    SqliteUserStore, UserStore,
};
use cinedex_server::api::create_router;
use cinedex_server::state::AppState;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const USER_EMAIL: &str = "user@example.com";
pub const USER_PASSWORD: &str = "user-password";

/// In-process test server over in-memory stores.
pub struct TestFixture {
    pub router: Router,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture with an admin and a regular user seeded.
    pub fn new() -> Self {
        Self::with_genre_store(Arc::new(SqliteGenreStore::in_memory().unwrap()))
    }

    /// Create a fixture with a custom genre store (for failure injection).
    pub fn with_genre_store(genre_store: Arc<dyn GenreStore>) -> Self {
        let config = Config {
            auth: AuthConfig {
                jwt_secret: "test-secret".to_string(),
                token_ttl_secs: 3600,
                seed_admin: None,
            },
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
        };

        let users = Arc::new(SqliteUserStore::in_memory().unwrap());
        users
            .insert(&NewUser {
                email: ADMIN_EMAIL.to_string(),
                password_sha256: hash_password(ADMIN_PASSWORD),
                role: Role::Admin,
            })
            .unwrap();
        users
            .insert(&NewUser {
                email: USER_EMAIL.to_string(),
                password_sha256: hash_password(USER_PASSWORD),
                role: Role::User,
            })
            .unwrap();

        let catalog = CatalogService::new(
            Arc::new(SqliteMovieStore::in_memory().unwrap()),
            genre_store,
        );

        let state = Arc::new(AppState::new(
            config,
            catalog,
            users,
            Arc::new(JwtAuthenticator::new("test-secret", 3600)),
        ));

        Self {
            router: create_router(state),
        }
    }

    /// Log in and return the token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post(
                "/auth/login",
                serde_json::json!({ "email": email, "password": password }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        response.body["token"].as_str().unwrap().to_string()
    }

    /// Log in as the seeded admin.
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, None).await
    }

    pub async fn post(&self, path: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.request("POST", path, Some(body), token).await
    }

    pub async fn put(&self, path: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.request("PUT", path, Some(body), token).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.request("DELETE", path, None, token).await
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            request_builder =
                request_builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
