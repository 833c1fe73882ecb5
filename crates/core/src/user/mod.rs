//! User accounts consulted by login and startup seeding.

mod sqlite;
mod store;
mod types;

pub use sqlite::SqliteUserStore;
pub use store::UserStore;
pub use types::*;
