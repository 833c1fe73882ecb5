use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed to call the API cross-origin. Empty means none.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret used to sign and verify tokens.
    pub jwt_secret: String,
    /// Token lifetime in seconds (default: 1 hour).
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    /// Admin account inserted at startup if absent.
    #[serde(default)]
    pub seed_admin: Option<SeedAdmin>,
}

fn default_token_ttl() -> u64 {
    3600
}

/// Admin account seeded at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("cinedex.db")
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub auth: SanitizedAuthConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuthConfig {
    pub jwt_secret_configured: bool,
    pub token_ttl_secs: u64,
    pub seed_admin_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            auth: SanitizedAuthConfig {
                jwt_secret_configured: !config.auth.jwt_secret.is_empty(),
                token_ttl_secs: config.auth.token_ttl_secs,
                seed_admin_configured: config.auth.seed_admin.is_some(),
            },
            server: config.server.clone(),
            database: config.database.clone(),
        }
    }
}
