pub mod dashboard;
pub mod health;
pub mod home;
pub mod measurements;
pub mod users;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use dashboard::{get_dashboard, get_metric_series, list_weeks};
pub use health::health_check;
pub use home::{home, not_found};
pub use measurements::{create_measurement, list_measurements, reload_measurements, submit_data_entry};
pub use users::{add_user, delete_user, get_user, list_users, update_user};
