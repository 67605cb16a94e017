use axum::Json;
use tracing::debug;

use crate::entities::common::ErrorResponse;
use crate::entities::measurement::{HomeResponse, ViewLink};

const VIEWS: [(&str, &str, &str); 8] = [
    ("Data entry", "/data-entry", "Record weight, temperature and blood pressure"),
    ("Dashboard", "/api/v1/dashboard", "Totals, recorded weeks and the latest entry"),
    ("Measurements", "/api/v1/measurements", "Every measurement, optionally for one week"),
    ("Temperature", "/api/v1/metrics/temperature", "Temperature by week and day"),
    ("Tension", "/api/v1/metrics/tension", "Blood pressure readings and their category"),
    ("Weight", "/api/v1/metrics/weight", "Weight by week and day"),
    ("Users", "/api/v1/users", "Operator directory"),
    ("API documentation", "/api-docs", "Interactive OpenAPI documentation"),
];

/// Landing page listing the navigable views
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Available views", body = HomeResponse),
    ),
    tag = "health"
)]
pub async fn home() -> Json<HomeResponse> {
    debug!("Home requested");
    Json(HomeResponse {
        name: "HealthTracker".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        views: VIEWS
            .iter()
            .map(|(name, path, description)| ViewLink {
                name: name.to_string(),
                path: path.to_string(),
                description: description.to_string(),
            })
            .collect(),
    })
}

/// Fallback for unknown paths
pub async fn not_found() -> ErrorResponse {
    ErrorResponse::not_found("page")
}
