use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::home::home,
        crate::api::handlers::health::health_check,

        // Measurement endpoints
        crate::api::handlers::measurements::submit_data_entry,
        crate::api::handlers::measurements::create_measurement,
        crate::api::handlers::measurements::list_measurements,
        crate::api::handlers::measurements::reload_measurements,

        // Dashboard endpoints
        crate::api::handlers::dashboard::list_weeks,
        crate::api::handlers::dashboard::get_dashboard,
        crate::api::handlers::dashboard::get_metric_series,

        // User directory endpoints
        crate::api::handlers::users::list_users,
        crate::api::handlers::users::get_user,
        crate::api::handlers::users::add_user,
        crate::api::handlers::users::update_user,
        crate::api::handlers::users::delete_user
    ),
    components(
        schemas(
            // Domain entities
            health_tracker_domain::entities::MeasurementRecord,
            health_tracker_domain::entities::CreateMeasurementRequest,
            health_tracker_domain::entities::MeasurementForm,
            health_tracker_domain::entities::DashboardSummary,
            health_tracker_domain::entities::MetricCounts,
            health_tracker_domain::entities::WeekCount,
            health_tracker_domain::entities::Metric,
            health_tracker_domain::entities::MetricPoint,
            health_tracker_domain::entities::MetricSeries,
            health_tracker_domain::entities::BloodPressureCategory,
            health_tracker_domain::entities::DirectoryUser,
            health_tracker_domain::entities::UserFields,

            // Public entities
            crate::entities::common::ErrorResponse,
            crate::entities::measurement::MeasurementListResponse,
            crate::entities::measurement::WeeksResponse,
            crate::entities::measurement::DashboardResponse,
            crate::entities::measurement::ReloadResponse,
            crate::entities::measurement::HomeResponse,
            crate::entities::measurement::ViewLink,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus
        )
    ),
    tags(
        (name = "health", description = "Health check and landing endpoints"),
        (name = "measurements", description = "Measurement entry and listing"),
        (name = "dashboard", description = "Aggregated views over the measurements"),
        (name = "users", description = "Operator directory")
    ),
    info(
        title = "HealthTracker API",
        version = "0.1.0",
        description = "API for recording weekly health measurements",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
