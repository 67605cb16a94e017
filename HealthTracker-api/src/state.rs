use std::sync::Arc;

use axum::extract::FromRef;

use health_tracker_domain::health::{HealthService, HealthServiceTrait};
use health_tracker_domain::services::{HealthDataServiceTrait, SharedUserDirectory, UserDirectory};

/// Service type for dependency injection
pub type HealthDataHandle = Arc<dyn HealthDataServiceTrait>;

/// Health service type for dependency injection
pub type HealthHandle = Arc<dyn HealthServiceTrait>;

/// Shared application state; handlers extract the part they need
#[derive(Clone, FromRef)]
pub struct AppState {
    pub health_data: HealthDataHandle,
    pub users: SharedUserDirectory,
    pub health: HealthHandle,
    /// Deployment name reported by the health endpoint
    pub environment: Environment,
}

/// Deployment name, e.g. `development`
#[derive(Debug, Clone)]
pub struct Environment(pub Arc<str>);

impl AppState {
    /// State over the given data service with the seeded user directory
    pub fn new(health_data: HealthDataHandle) -> Self {
        let health: HealthHandle = Arc::new(HealthService::new(health_data.clone()));
        Self {
            health_data,
            users: UserDirectory::default().shared(),
            health,
            environment: Environment(Arc::from("development")),
        }
    }

    /// Replace the user directory
    pub fn with_users(mut self, users: UserDirectory) -> Self {
        self.users = users.shared();
        self
    }

    /// Replace the health service
    pub fn with_health_service(mut self, health: HealthHandle) -> Self {
        self.health = health;
        self
    }

    /// Set the deployment name
    pub fn with_environment(mut self, environment: impl Into<Arc<str>>) -> Self {
        self.environment = Environment(environment.into());
        self
    }
}
