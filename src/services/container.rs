//! Service container - centralized service access.

use std::sync::Arc;

use super::{ExplorationService, UserService};
use crate::infra::Persistence;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get exploration service
    fn exploration(&self) -> Arc<dyn ExplorationService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    exploration_service: Arc<dyn ExplorationService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        user_service: Arc<dyn UserService>,
        exploration_service: Arc<dyn ExplorationService>,
    ) -> Self {
        Self {
            user_service,
            exploration_service,
        }
    }

    /// Create service container from a database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        use super::{ExplorationManager, UserManager};

        let uow = Arc::new(Persistence::new(db));
        let user_service = Arc::new(UserManager::new(uow.clone()));
        let exploration_service = Arc::new(ExplorationManager::new(uow));

        Self {
            user_service,
            exploration_service,
        }
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn exploration(&self) -> Arc<dyn ExplorationService> {
        self.exploration_service.clone()
    }
}
