use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::user::Role;

/// Request information for authentication.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    /// Header names lowercased.
    pub headers: HashMap<String, String>,
}

impl AuthRequest {
    /// Extract the bearer token from the Authorization header, if any.
    pub fn bearer_token(&self) -> Option<&str> {
        let auth_header = self.headers.get("authorization")?;
        auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
    }
}

/// Authenticated identity resolved from credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub role: Role,
}
