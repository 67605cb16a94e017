// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

// Re-export useful test mocks from the data layer
pub use health_tracker_data::repository::tests::MockMeasurementRepository;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use health_tracker_data::models::measurement::MeasurementRow;

use crate::entities::measurement::{CreateMeasurementRequest, MeasurementForm};
use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth, SystemStatus};
use crate::services::health_data::HealthDataService;

/// A stored row with typical values for the given week and day
pub fn sample_row(id: &str, week: u8, day: u8) -> MeasurementRow {
    MeasurementRow {
        id: id.to_string(),
        weight: Some(70.0),
        temperature: Some(36.6),
        tension: Some("120/80".to_string()),
        week,
        day,
        date: Some("2024-01-01".to_string()),
        created_at: None,
    }
}

/// A request that passes validation
pub fn valid_request() -> CreateMeasurementRequest {
    CreateMeasurementRequest {
        weight: 70.0,
        temperature: 36.6,
        tension: "120/80".to_string(),
        week: 1,
        day: 1,
    }
}

/// The form a user types to produce [`valid_request`]
pub fn valid_form() -> MeasurementForm {
    MeasurementForm {
        weight: "70".to_string(),
        temperature: "36.6".to_string(),
        tension: "120/80".to_string(),
        week: "1".to_string(),
        day: "1".to_string(),
    }
}

/// A data service over a mock repository holding `rows`, already loaded
pub async fn loaded_service(rows: Vec<MeasurementRow>) -> (Arc<HealthDataService>, Arc<MockMeasurementRepository>) {
    let repository = Arc::new(MockMeasurementRepository::with_rows(rows));
    let service = Arc::new(HealthDataService::new(repository.clone()));
    if let Err(e) = crate::services::HealthDataServiceTrait::load(service.as_ref()).await {
        panic!("mock repository failed to load: {}", e);
    }
    (service, repository)
}

/// Mock implementation of health services for testing system health
#[derive(Debug)]
pub struct MockHealthService {
    /// Backend component status
    backend_status: ComponentStatus,
    /// System status
    system_status: SystemStatus,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a new mock health service with all components healthy
    pub fn new() -> Self {
        Self {
            backend_status: ComponentStatus::Healthy,
            system_status: SystemStatus::Healthy,
        }
    }

    /// Configure the mock with an unreachable backend
    pub fn with_unhealthy_backend(mut self) -> Self {
        self.backend_status = ComponentStatus::Unhealthy;
        self.system_status = SystemStatus::Unhealthy;
        self
    }

    /// Configure the mock with a backend whose last call failed
    pub fn with_degraded_backend(mut self) -> Self {
        self.backend_status = ComponentStatus::Degraded;
        self.system_status = SystemStatus::Degraded;
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();
        components.insert(
            "backend".to_string(),
            HealthComponent {
                status: self.backend_status.clone(),
                details: match self.backend_status {
                    ComponentStatus::Healthy => None,
                    ComponentStatus::Degraded => Some("Last backend call failed".to_string()),
                    ComponentStatus::Unhealthy => Some("Record store unavailable".to_string()),
                },
            },
        );
        components.insert(
            "api".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );

        SystemHealth {
            status: self.system_status.clone(),
            components,
        }
    }

    async fn check_backend_status(&self) -> Result<bool, String> {
        match self.backend_status {
            ComponentStatus::Healthy => Ok(true),
            ComponentStatus::Degraded => Ok(false),
            ComponentStatus::Unhealthy => Err("Record store unavailable".to_string()),
        }
    }
}
