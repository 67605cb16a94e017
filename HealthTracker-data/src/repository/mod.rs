// Repository module structure
pub mod errors;
mod in_memory;
mod measurement;
mod rest;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use in_memory::InMemoryMeasurementRepository;
pub use measurement::{create_repository, MeasurementRepositoryTrait};
pub use rest::RestMeasurementRepository;

// Re-export test modules for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use measurement::tests;
