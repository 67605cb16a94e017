// Public entities for the HealthTracker API
// This module contains data structures that are shared across the application boundary

// Common entities for error handling and query parameters
pub mod common;

// Response bodies for the measurement views
pub mod measurement;

pub use common::{ErrorResponse, WeekQuery};
