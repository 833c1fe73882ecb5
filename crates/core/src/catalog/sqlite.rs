//! SQLite-backed movie and genre stores.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};
use tracing::debug;

use super::types::derived_score;
use super::{
    CatalogError, Genre, GenreStore, Movie, MovieFilter, MoviePage, MoviePatch, MovieStore,
    NewMovie,
};

/// SQLite-backed movie store.
pub struct SqliteMovieStore {
    conn: Mutex<Connection>,
}

impl SqliteMovieStore {
    /// Create a new store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, CatalogError> {
        let conn = Connection::open(path).map_err(|e| CatalogError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, CatalogError> {
        let conn =
            Connection::open_in_memory().map_err(|e| CatalogError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), CatalogError> {
        conn.execute_batch(
            r#"
            -- Movie records. AUTOINCREMENT prevents rowid reuse, so a
            -- deleted id never comes back as a different movie.
            CREATE TABLE IF NOT EXISTS movies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                director TEXT NOT NULL,
                popularity INTEGER NOT NULL,
                score REAL NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_movies_name ON movies(name);

            -- Genre names per movie (one row per movie/genre pair).
            CREATE TABLE IF NOT EXISTS movie_genres (
                movie_id INTEGER NOT NULL REFERENCES movies(id),
                genre TEXT NOT NULL,
                UNIQUE(movie_id, genre)
            );

            CREATE INDEX IF NOT EXISTS idx_movie_genres_movie ON movie_genres(movie_id);
            CREATE INDEX IF NOT EXISTS idx_movie_genres_genre ON movie_genres(genre);
            "#,
        )
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(())
    }

    /// Load genre names for a movie, sorted.
    fn load_genres(conn: &Connection, movie_id: i64) -> Result<Vec<String>, CatalogError> {
        let mut stmt = conn
            .prepare("SELECT genre FROM movie_genres WHERE movie_id = ? ORDER BY genre")
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![movie_id], |row| row.get(0))
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let mut genres = Vec::new();
        for row in rows {
            genres.push(row.map_err(|e| CatalogError::Database(e.to_string()))?);
        }
        Ok(genres)
    }

    /// Convert a row to Movie (without genres).
    fn row_to_movie(row: &rusqlite::Row) -> rusqlite::Result<Movie> {
        Ok(Movie {
            id: row.get(0)?,
            name: row.get(1)?,
            director: row.get(2)?,
            popularity: row.get(3)?,
            score: row.get(4)?,
            genres: Vec::new(), // Loaded separately
        })
    }

    /// Build the WHERE clause and its parameters for a filter.
    ///
    /// Each requested genre becomes an EXISTS probe against movie_genres, so
    /// a movie matches only when it carries every one of them. The search
    /// text matches name OR director via LIKE, which is case-insensitive for
    /// ASCII in SQLite.
    fn build_where_clause(filter: &MovieFilter) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
        let mut clauses: Vec<String> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        for genre in &filter.genres {
            clauses.push(
                "EXISTS (SELECT 1 FROM movie_genres mg WHERE mg.movie_id = m.id AND mg.genre = ?)"
                    .to_string(),
            );
            params.push(Box::new(genre.clone()));
        }

        if let Some(ref text) = filter.search {
            clauses.push("(m.name LIKE ? OR m.director LIKE ?)".to_string());
            let pattern = format!("%{}%", text);
            params.push(Box::new(pattern.clone()));
            params.push(Box::new(pattern));
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };

        (where_clause, params)
    }
}

impl MovieStore for SqliteMovieStore {
    fn search(&self, filter: &MovieFilter) -> Result<MoviePage, CatalogError> {
        let conn = self.conn.lock().unwrap();

        let (where_clause, mut all_params) = Self::build_where_clause(filter);
        all_params.push(Box::new(filter.limit));
        all_params.push(Box::new(filter.offset));

        let column = filter.sort_field.column();
        let direction = filter.sort_order.keyword();

        // One statement: the filtered CTE feeds both the paginated branch
        // and the count branch, so the page and the total come from the same
        // snapshot. The single-row seed keeps the total visible when the
        // requested page is past the end.
        let sql = format!(
            "WITH matching AS (
                 SELECT m.id, m.name, m.director, m.popularity, m.score FROM movies m {where_clause}
             ),
             page AS (
                 SELECT * FROM matching ORDER BY {column} {direction}, id {direction} LIMIT ? OFFSET ?
             )
             SELECT (SELECT COUNT(*) FROM matching) AS total,
                    p.id, p.name, p.director, p.popularity, p.score
             FROM (SELECT 1) LEFT JOIN page p ON 1 = 1
             ORDER BY p.{column} {direction}, p.id {direction}"
        );

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let param_refs: Vec<&dyn rusqlite::ToSql> = all_params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), |row| {
                let total: i64 = row.get(0)?;
                let id: Option<i64> = row.get(1)?;
                let movie = match id {
                    Some(id) => Some(Movie {
                        id,
                        name: row.get(2)?,
                        director: row.get(3)?,
                        popularity: row.get(4)?,
                        score: row.get(5)?,
                        genres: Vec::new(),
                    }),
                    None => None,
                };
                Ok((total, movie))
            })
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let mut total = 0;
        let mut movies = Vec::new();
        for row in rows {
            let (row_total, movie) = row.map_err(|e| CatalogError::Database(e.to_string()))?;
            total = row_total;
            if let Some(mut movie) = movie {
                movie.genres = Self::load_genres(&conn, movie.id)?;
                movies.push(movie);
            }
        }

        Ok(MoviePage { movies, total })
    }

    fn get(&self, id: i64) -> Result<Option<Movie>, CatalogError> {
        let conn = self.conn.lock().unwrap();

        let result = conn.query_row(
            "SELECT id, name, director, popularity, score FROM movies WHERE id = ?",
            params![id],
            Self::row_to_movie,
        );

        match result {
            Ok(mut movie) => {
                movie.genres = Self::load_genres(&conn, movie.id)?;
                Ok(Some(movie))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CatalogError::Database(e.to_string())),
        }
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Movie>, CatalogError> {
        let conn = self.conn.lock().unwrap();

        let result = conn.query_row(
            "SELECT id, name, director, popularity, score FROM movies WHERE name = ? LIMIT 1",
            params![name],
            Self::row_to_movie,
        );

        match result {
            Ok(mut movie) => {
                movie.genres = Self::load_genres(&conn, movie.id)?;
                Ok(Some(movie))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CatalogError::Database(e.to_string())),
        }
    }

    fn insert(&self, movie: &NewMovie) -> Result<Movie, CatalogError> {
        let conn = self.conn.lock().unwrap();
        let score = derived_score(movie.popularity);

        conn.execute(
            "INSERT INTO movies (name, director, popularity, score) VALUES (?, ?, ?, ?)",
            params![&movie.name, &movie.director, movie.popularity, score],
        )
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        let id = conn.last_insert_rowid();

        for genre in &movie.genres {
            conn.execute(
                "INSERT OR IGNORE INTO movie_genres (movie_id, genre) VALUES (?, ?)",
                params![id, genre],
            )
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        }

        debug!(id, name = %movie.name, "inserted movie");

        Ok(Movie {
            id,
            name: movie.name.clone(),
            director: movie.director.clone(),
            genres: Self::load_genres(&conn, id)?,
            popularity: movie.popularity,
            score,
        })
    }

    fn update(&self, id: i64, patch: &MoviePatch) -> Result<Movie, CatalogError> {
        let conn = self.conn.lock().unwrap();

        let exists: bool = conn
            .query_row("SELECT 1 FROM movies WHERE id = ?", params![id], |_| {
                Ok(true)
            })
            .unwrap_or(false);

        if !exists {
            return Err(CatalogError::NotFound(id));
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref director) = patch.director {
            assignments.push("director = ?");
            values.push(Box::new(director.clone()));
        }

        if let Some(popularity) = patch.popularity {
            assignments.push("popularity = ?");
            values.push(Box::new(popularity));
            assignments.push("score = ?");
            values.push(Box::new(derived_score(popularity)));
        }

        if !assignments.is_empty() {
            values.push(Box::new(id));
            let sql = format!("UPDATE movies SET {} WHERE id = ?", assignments.join(", "));
            let value_refs: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();
            conn.execute(&sql, value_refs.as_slice())
                .map_err(|e| CatalogError::Database(e.to_string()))?;
        }

        if let Some(ref genres) = patch.genres {
            conn.execute("DELETE FROM movie_genres WHERE movie_id = ?", params![id])
                .map_err(|e| CatalogError::Database(e.to_string()))?;
            for genre in genres {
                conn.execute(
                    "INSERT OR IGNORE INTO movie_genres (movie_id, genre) VALUES (?, ?)",
                    params![id, genre],
                )
                .map_err(|e| CatalogError::Database(e.to_string()))?;
            }
        }

        let mut movie = conn
            .query_row(
                "SELECT id, name, director, popularity, score FROM movies WHERE id = ?",
                params![id],
                Self::row_to_movie,
            )
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        movie.genres = Self::load_genres(&conn, id)?;

        debug!(id, "updated movie");

        Ok(movie)
    }

    fn delete(&self, id: i64) -> Result<bool, CatalogError> {
        let conn = self.conn.lock().unwrap();

        conn.execute("DELETE FROM movie_genres WHERE movie_id = ?", params![id])
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let rows_affected = conn
            .execute("DELETE FROM movies WHERE id = ?", params![id])
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(rows_affected > 0)
    }
}

/// SQLite-backed genre registry.
pub struct SqliteGenreStore {
    conn: Mutex<Connection>,
}

impl SqliteGenreStore {
    /// Create a new registry, creating the database file and table if needed.
    pub fn new(path: &Path) -> Result<Self, CatalogError> {
        let conn = Connection::open(path).map_err(|e| CatalogError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory registry (useful for testing).
    pub fn in_memory() -> Result<Self, CatalogError> {
        let conn =
            Connection::open_in_memory().map_err(|e| CatalogError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), CatalogError> {
        // The name key makes insert-if-missing atomic; concurrent first-time
        // inserts of the same genre cannot produce duplicate rows.
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS genres (
                 name TEXT PRIMARY KEY
             );",
        )
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(())
    }
}

impl GenreStore for SqliteGenreStore {
    fn names(&self) -> Result<BTreeSet<String>, CatalogError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare("SELECT name FROM genres")
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let mut names = BTreeSet::new();
        for row in rows {
            names.insert(row.map_err(|e| CatalogError::Database(e.to_string()))?);
        }
        Ok(names)
    }

    fn insert_missing(&self, names: &[String]) -> Result<u32, CatalogError> {
        let conn = self.conn.lock().unwrap();
        let mut inserted = 0;

        for name in names {
            let rows_affected = conn
                .execute("INSERT OR IGNORE INTO genres (name) VALUES (?)", params![name])
                .map_err(|e| CatalogError::Database(e.to_string()))?;
            inserted += rows_affected as u32;
        }

        Ok(inserted)
    }

    fn list(&self) -> Result<Vec<Genre>, CatalogError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare("SELECT name FROM genres ORDER BY name")
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| Ok(Genre { name: row.get(0)? }))
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let mut genres = Vec::new();
        for row in rows {
            genres.push(row.map_err(|e| CatalogError::Database(e.to_string()))?);
        }
        Ok(genres)
    }
}
