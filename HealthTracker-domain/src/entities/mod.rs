// Domain entities and value objects
pub mod blood_pressure;
pub mod conversions;
pub mod measurement;
pub mod user;

// Re-export common types for easier imports
pub use blood_pressure::{BloodPressureCategory, Tension};
pub use measurement::{
    CreateMeasurementRequest, DashboardSummary, MeasurementForm, MeasurementRecord, Metric,
    MetricCounts, MetricPoint, MetricSeries, WeekCount,
};
pub use user::{DirectoryUser, UserFields};
