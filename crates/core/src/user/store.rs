//! Storage trait for user accounts.

use super::{NewUser, User, UserError};

/// Trait for user account storage backends.
///
/// Accounts are written only by startup seeding; login reads them.
pub trait UserStore: Send + Sync {
    /// Look up a user by exact email.
    fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Insert a new user account.
    fn insert(&self, user: &NewUser) -> Result<User, UserError>;
}
