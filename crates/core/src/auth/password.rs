//! Password digest helpers.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of a password.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Check a password against a stored digest.
pub fn verify_password(password: &str, digest: &str) -> bool {
    constant_time_eq(hash_password(password).as_bytes(), digest.as_bytes())
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
