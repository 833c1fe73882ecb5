use std::sync::Arc;

use cinedex_core::{CatalogService, Config, JwtAuthenticator, SanitizedConfig, UserStore};

/// Shared application state
pub struct AppState {
    config: Config,
    catalog: CatalogService,
    users: Arc<dyn UserStore>,
    authenticator: Arc<JwtAuthenticator>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: CatalogService,
        users: Arc<dyn UserStore>,
        authenticator: Arc<JwtAuthenticator>,
    ) -> Self {
        Self {
            config,
            catalog,
            users,
            authenticator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    pub fn authenticator(&self) -> &JwtAuthenticator {
        self.authenticator.as_ref()
    }
}
