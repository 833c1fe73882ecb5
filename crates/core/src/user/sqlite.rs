//! SQLite-backed user store.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use super::{NewUser, Role, User, UserError, UserStore};

/// SQLite-backed user account store.
pub struct SqliteUserStore {
    conn: Mutex<Connection>,
}

impl SqliteUserStore {
    /// Create a new store, creating the database file and table if needed.
    pub fn new(path: &Path) -> Result<Self, UserError> {
        let conn = Connection::open(path).map_err(|e| UserError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, UserError> {
        let conn = Connection::open_in_memory().map_err(|e| UserError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), UserError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 email TEXT NOT NULL UNIQUE,
                 password_sha256 TEXT NOT NULL,
                 role TEXT NOT NULL
             );",
        )
        .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(())
    }

    fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
        let role_str: String = row.get(3)?;
        let role = Role::parse(&role_str).unwrap_or(Role::User);

        Ok(User {
            id: row.get(0)?,
            email: row.get(1)?,
            password_sha256: row.get(2)?,
            role,
        })
    }
}

impl UserStore for SqliteUserStore {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let conn = self.conn.lock().unwrap();

        let result = conn.query_row(
            "SELECT id, email, password_sha256, role FROM users WHERE email = ?",
            params![email],
            Self::row_to_user,
        );

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(UserError::Database(e.to_string())),
        }
    }

    fn insert(&self, user: &NewUser) -> Result<User, UserError> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO users (email, password_sha256, role) VALUES (?, ?, ?)",
            params![&user.email, &user.password_sha256, user.role.as_str()],
        )
        .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(User {
            id: conn.last_insert_rowid(),
            email: user.email.clone(),
            password_sha256: user.password_sha256.clone(),
            role: user.role,
        })
    }
}
