use axum::{
    extract::{rejection::QueryRejection, Json, Path, Query, State},
    response::IntoResponse,
};
use tracing::{debug, instrument};

use health_tracker_domain::entities::{Metric, MetricSeries};

use crate::entities::common::{ErrorResponse, WeekQuery};
use crate::entities::measurement::{DashboardResponse, WeeksResponse};
use crate::state::HealthDataHandle;

/// Distinct recorded weeks, ascending
#[utoipa::path(
    get,
    path = "/api/v1/weeks",
    responses(
        (status = 200, description = "Recorded weeks", body = WeeksResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "dashboard"
)]
#[instrument(skip(service))]
pub async fn list_weeks(State(service): State<HealthDataHandle>) -> Result<Json<WeeksResponse>, ErrorResponse> {
    Ok(Json(WeeksResponse {
        weeks: service.all_weeks()?,
    }))
}

/// Dashboard summary
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard values", body = DashboardResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "dashboard"
)]
#[instrument(skip(service))]
pub async fn get_dashboard(State(service): State<HealthDataHandle>) -> Result<Json<DashboardResponse>, ErrorResponse> {
    let status = service.status();
    let summary = service.summary()?;
    debug!("Dashboard: {} entries over {} weeks", summary.total_entries, summary.weeks_recorded);

    Ok(Json(DashboardResponse {
        loaded: status.loaded,
        last_error: status.last_error,
        summary,
    }))
}

/// Chart data for one metric
#[utoipa::path(
    get,
    path = "/api/v1/metrics/{metric}",
    params(
        ("metric" = String, Path, description = "temperature, tension or weight"),
        WeekQuery
    ),
    responses(
        (status = 200, description = "Metric series", body = MetricSeries),
        (status = 400, description = "Malformed week filter", body = ErrorResponse),
        (status = 404, description = "Unknown metric", body = ErrorResponse),
    ),
    tag = "dashboard"
)]
#[instrument(skip(service))]
pub async fn get_metric_series(
    State(service): State<HealthDataHandle>,
    Path(metric): Path<String>,
    query: Result<Query<WeekQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let metric: Metric = metric.parse().map_err(|_| ErrorResponse::not_found("metric"))?;
    let Query(query) = query?;
    Ok(Json(service.metric_series(metric, query.week)?))
}
