pub mod aggregator;
pub mod health_data;
pub mod user_directory;
pub mod validation;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and types
pub use health_data::{HealthDataService, HealthDataServiceError, HealthDataServiceTrait, StoreStatus};
pub use user_directory::{SharedUserDirectory, UserDirectory};
pub use validation::ValidationError;
