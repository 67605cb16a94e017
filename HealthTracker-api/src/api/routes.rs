use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::debug;

use crate::api::handlers::{dashboard, health, home, measurements, users};
use crate::openapi::configure_swagger_routes;
use crate::state::AppState;

/// Create the application router
pub fn create_app(state: AppState) -> Router {
    debug!("Creating application router");

    let api_routes = Router::new()
        // Define specific routes before parametrized routes to avoid conflicts
        .route("/measurements/reload", post(measurements::reload_measurements))
        .route(
            "/measurements",
            get(measurements::list_measurements).post(measurements::create_measurement),
        )
        .route("/weeks", get(dashboard::list_weeks))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/metrics/:metric", get(dashboard::get_metric_series))
        .route("/users", get(users::list_users).post(users::add_user))
        .route(
            "/users/:id",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        );

    debug!("API routes configured");

    let public_routes = Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health_check))
        .route("/data-entry", post(measurements::submit_data_entry));

    debug!("Public routes configured");

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .fallback(home::not_found)
        .with_state(state);

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    let app = configure_middleware(app);

    // Initialize health check service startup time
    health::initialize_server_start_time();

    app
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}

/// Apply request tracing, CORS and security headers to every route
fn configure_middleware(app: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("permissions-policy"),
            HeaderValue::from_static("camera=(), microphone=(), geolocation=(), interest-cohort=()"),
        ));

    app.layer(cors)
        .layer(security_headers)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Arc;

    use health_tracker_domain::services::HealthDataService;
    use health_tracker_domain::testing::{loaded_service, MockMeasurementRepository};
    use health_tracker_data::models::measurement::MeasurementRow;

    /// Create a test application over a loaded mock store
    pub async fn create_test_app(rows: Vec<MeasurementRow>) -> (Router, Arc<MockMeasurementRepository>) {
        let (service, repository) = loaded_service(rows).await;
        (create_app(AppState::new(service)), repository)
    }

    /// Create a test application whose store fails every call
    pub fn create_failing_app() -> (Router, Arc<HealthDataService>) {
        let repository = Arc::new(MockMeasurementRepository::new().with_fetch_failure().with_insert_failure());
        let service = Arc::new(HealthDataService::new(repository));
        (create_app(AppState::new(service.clone())), service)
    }
}
