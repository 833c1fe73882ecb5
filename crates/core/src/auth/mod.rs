//! Credential issuance and verification.
//!
//! The catalog engine never sees tokens or roles; the server's middleware
//! resolves an [`Identity`] through the [`Authenticator`] seam before
//! mutation handlers run.

mod jwt;
mod password;
mod traits;
mod types;

pub use jwt::{Claims, JwtAuthenticator};
pub use password::{hash_password, verify_password};
pub use traits::*;
pub use types::*;

use crate::config::AuthConfig;

/// Factory function to create the authenticator from config.
pub fn create_authenticator(config: &AuthConfig) -> Result<JwtAuthenticator, AuthError> {
    if config.jwt_secret.is_empty() {
        return Err(AuthError::ConfigurationError(
            "jwt_secret must not be empty".to_string(),
        ));
    }

    Ok(JwtAuthenticator::new(
        &config.jwt_secret,
        config.token_ttl_secs,
    ))
}
