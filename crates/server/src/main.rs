use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinedex_core::{
    create_authenticator, hash_password, load_config, validate_config, CatalogService, NewUser,
    Role, SqliteGenreStore, SqliteMovieStore, SqliteUserStore, UserStore,
};

use cinedex_server::api::create_router;
use cinedex_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("CINEDEX_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);

    // Create stores
    let movie_store = Arc::new(
        SqliteMovieStore::new(&config.database.path).context("Failed to create movie store")?,
    );
    info!("Movie store initialized");

    let genre_store = Arc::new(
        SqliteGenreStore::new(&config.database.path).context("Failed to create genre store")?,
    );
    info!("Genre store initialized");

    let user_store: Arc<dyn UserStore> = Arc::new(
        SqliteUserStore::new(&config.database.path).context("Failed to create user store")?,
    );
    info!("User store initialized");

    // Create authenticator
    let authenticator =
        Arc::new(create_authenticator(&config.auth).context("Failed to create authenticator")?);

    // Seed the admin account if configured and absent
    if let Some(ref seed) = config.auth.seed_admin {
        let existing = user_store
            .find_by_email(&seed.email)
            .context("Failed to look up seed admin")?;
        if existing.is_none() {
            user_store
                .insert(&NewUser {
                    email: seed.email.clone(),
                    password_sha256: hash_password(&seed.password),
                    role: Role::Admin,
                })
                .context("Failed to seed admin user")?;
            info!(email = %seed.email, "seeded admin user");
        }
    }

    // Create catalog service
    let catalog = CatalogService::new(movie_store, genre_store);

    // Create app state
    let state = Arc::new(AppState::new(
        config.clone(),
        catalog,
        user_store,
        authenticator,
    ));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
