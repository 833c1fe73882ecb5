pub mod auth;
pub mod catalog;
pub mod config;
pub mod testing;
pub mod user;

pub use auth::{
    create_authenticator, hash_password, verify_password, AuthError, AuthRequest, Authenticator,
    Identity, JwtAuthenticator,
};
pub use catalog::{
    validate_new_movie, validate_patch, CatalogError, CatalogService, FieldError, Genre,
    GenreStore, Movie, MovieFilter, MoviePage, MoviePatch, MovieStore, NewMovie, SortField,
    SortOrder, SqliteGenreStore, SqliteMovieStore,
};
pub use config::{
    load_config, load_config_from_str, validate_config, AuthConfig, Config, ConfigError,
    DatabaseConfig, SanitizedConfig, SeedAdmin, ServerConfig,
};
pub use user::{NewUser, Role, SqliteUserStore, User, UserError, UserStore};
