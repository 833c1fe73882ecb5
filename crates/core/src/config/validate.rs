use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Auth section exists (enforced by serde)
/// - jwt_secret is not empty
/// - Server port is not 0
/// - CORS origins look like origins (scheme://host)
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.auth.jwt_secret.is_empty() {
        return Err(ConfigError::ValidationError(
            "auth.jwt_secret cannot be empty".to_string(),
        ));
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    for origin in &config.server.cors_origins {
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "server.cors_origins entry '{}' must start with http:// or https://",
                origin
            )));
        }
    }

    Ok(())
}
