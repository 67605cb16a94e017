use axum::{
    extract::{rejection::QueryRejection, Form, Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, instrument};

use health_tracker_domain::entities::{CreateMeasurementRequest, MeasurementForm, MeasurementRecord};

use crate::entities::common::{ErrorResponse, WeekQuery};
use crate::entities::measurement::{MeasurementListResponse, ReloadResponse};
use crate::state::HealthDataHandle;

/// Submit the data-entry form
///
/// Fields arrive exactly as typed; they are trimmed and validated in form
/// order before anything is sent to the record store.
#[utoipa::path(
    post,
    path = "/data-entry",
    request_body(content = MeasurementForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Measurement saved", body = MeasurementRecord),
        (status = 400, description = "Invalid form input", body = ErrorResponse),
        (status = 502, description = "Record store failure", body = ErrorResponse),
    ),
    tag = "measurements"
)]
#[instrument(skip(service, form))]
pub async fn submit_data_entry(
    State(service): State<HealthDataHandle>,
    Form(form): Form<MeasurementForm>,
) -> Result<impl IntoResponse, ErrorResponse> {
    info!("Data entry submitted");

    let record = service.submit_form(&form).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Create a measurement from a typed JSON body
#[utoipa::path(
    post,
    path = "/api/v1/measurements",
    request_body = CreateMeasurementRequest,
    responses(
        (status = 201, description = "Measurement saved", body = MeasurementRecord),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Record store failure", body = ErrorResponse),
    ),
    tag = "measurements"
)]
#[instrument(skip(service, request))]
pub async fn create_measurement(
    State(service): State<HealthDataHandle>,
    Json(request): Json<CreateMeasurementRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    info!("Creating measurement for W{}D{}", request.week, request.day);

    let record = service.add_measurement(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List measurements, optionally for a single week
#[utoipa::path(
    get,
    path = "/api/v1/measurements",
    params(WeekQuery),
    responses(
        (status = 200, description = "Measurements in load order", body = MeasurementListResponse),
        (status = 400, description = "Malformed week filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "measurements"
)]
#[instrument(skip(service))]
pub async fn list_measurements(
    State(service): State<HealthDataHandle>,
    query: Result<Query<WeekQuery>, QueryRejection>,
) -> Result<Json<MeasurementListResponse>, ErrorResponse> {
    let Query(query) = query?;
    let data = match query.week {
        Some(week) => service.week_data(week)?,
        None => service.snapshot()?,
    };

    Ok(Json(MeasurementListResponse::new(query.week, data)))
}

/// Re-fetch every measurement from the record store
#[utoipa::path(
    post,
    path = "/api/v1/measurements/reload",
    responses(
        (status = 200, description = "List replaced", body = ReloadResponse),
        (status = 502, description = "Record store failure; previous list kept", body = ErrorResponse),
    ),
    tag = "measurements"
)]
#[instrument(skip(service))]
pub async fn reload_measurements(
    State(service): State<HealthDataHandle>,
) -> Result<Json<ReloadResponse>, ErrorResponse> {
    let loaded = service.load().await?;
    Ok(Json(ReloadResponse { loaded }))
}
