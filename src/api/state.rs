//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::domain::Catalog;
use crate::infra::Database;
use crate::services::{ExplorationService, ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Exploration service
    pub exploration_service: Arc<dyn ExplorationService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Static destination catalog
    pub catalog: Arc<Catalog>,
}

impl AppState {
    /// Create application state from an initialized database and catalog.
    pub fn from_config(database: Arc<Database>, catalog: Arc<Catalog>) -> Self {
        let container = Services::from_connection(database.get_connection());

        Self {
            user_service: container.users(),
            exploration_service: container.exploration(),
            database,
            catalog,
        }
    }

    /// Create application state with manually injected services.
    pub fn new(
        user_service: Arc<dyn UserService>,
        exploration_service: Arc<dyn ExplorationService>,
        database: Arc<Database>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            user_service,
            exploration_service,
            database,
            catalog,
        }
    }
}
