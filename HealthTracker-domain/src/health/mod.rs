//! Domain layer health check functionality
//! This module reports whether the record store has been reached

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::services::health_data::HealthDataServiceTrait;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the status of the record store
    /// Returns Ok(true) once data has been loaded and no failure is pending,
    /// Ok(false) when data is available but the last call failed,
    /// Err when nothing has ever been loaded
    async fn check_backend_status(&self) -> Result<bool, String>;
}

/// Health service backed by the measurement store's load state
pub struct HealthService {
    health_data: Arc<dyn HealthDataServiceTrait>,
}

impl fmt::Debug for HealthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthService").finish_non_exhaustive()
    }
}

impl HealthService {
    pub fn new(health_data: Arc<dyn HealthDataServiceTrait>) -> Self {
        Self { health_data }
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let backend_component = match self.check_backend_status().await {
            Ok(true) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
            Ok(false) => HealthComponent {
                status: ComponentStatus::Degraded,
                details: self.health_data.status().last_error,
            },
            Err(e) => HealthComponent {
                status: ComponentStatus::Unhealthy,
                details: Some(e),
            },
        };

        let overall_status = match backend_component.status {
            ComponentStatus::Healthy => SystemStatus::Healthy,
            // The API keeps serving entry forms and the user directory without data
            ComponentStatus::Degraded | ComponentStatus::Unhealthy => SystemStatus::Degraded,
        };

        SystemHealth {
            status: overall_status,
            components: vec![
                ("backend".to_string(), backend_component),
                (
                    "api".to_string(),
                    HealthComponent {
                        status: ComponentStatus::Healthy,
                        details: None,
                    },
                ),
            ]
            .into_iter()
            .collect(),
        }
    }

    async fn check_backend_status(&self) -> Result<bool, String> {
        let status = self.health_data.status();
        match (status.loaded, status.last_error) {
            (true, None) => Ok(true),
            (true, Some(_)) => Ok(false),
            (false, Some(e)) => Err(format!("Record store unavailable: {}", e)),
            (false, None) => Err("Measurements have not been loaded yet".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::health_data::HealthDataService;
    use health_tracker_data::repository::tests::MockMeasurementRepository;

    #[tokio::test]
    async fn test_healthy_after_load() {
        let data = Arc::new(HealthDataService::new(Arc::new(MockMeasurementRepository::new())));
        data.load().await.unwrap();

        let health = HealthService::new(data).get_system_health().await;
        assert_eq!(health.status, SystemStatus::Healthy);
        assert_eq!(health.components["backend"].status, ComponentStatus::Healthy);
        assert!(health.components.contains_key("api"));
    }

    #[tokio::test]
    async fn test_degraded_when_load_failed() {
        let data = Arc::new(HealthDataService::new(Arc::new(
            MockMeasurementRepository::new().with_fetch_failure(),
        )));
        assert!(data.load().await.is_err());

        let service = HealthService::new(data);
        assert!(service.check_backend_status().await.is_err());

        let health = service.get_system_health().await;
        assert_eq!(health.status, SystemStatus::Degraded);
        assert_eq!(health.components["backend"].status, ComponentStatus::Unhealthy);
        assert!(health.components["backend"].details.is_some());
    }
}
