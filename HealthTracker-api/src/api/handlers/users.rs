use std::sync::{RwLockReadGuard, RwLockWriteGuard};

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, info, instrument};

use health_tracker_domain::entities::{DirectoryUser, UserFields};
use health_tracker_domain::services::{SharedUserDirectory, UserDirectory};

use crate::entities::common::ErrorResponse;

fn read(users: &SharedUserDirectory) -> Result<RwLockReadGuard<'_, UserDirectory>, ErrorResponse> {
    users.read().map_err(|e| {
        error!("User directory lock poisoned: {}", e);
        ErrorResponse::internal_error()
    })
}

fn write(users: &SharedUserDirectory) -> Result<RwLockWriteGuard<'_, UserDirectory>, ErrorResponse> {
    users.write().map_err(|e| {
        error!("User directory lock poisoned: {}", e);
        ErrorResponse::internal_error()
    })
}

/// List every directory user
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Directory users in insertion order", body = [DirectoryUser]),
    ),
    tag = "users"
)]
#[instrument(skip(users))]
pub async fn list_users(State(users): State<SharedUserDirectory>) -> Result<Json<Vec<DirectoryUser>>, ErrorResponse> {
    let list = read(&users)?.list().to_vec();
    Ok(Json(list))
}

/// Get a directory user by id
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(
        ("id" = u32, Path, description = "Directory user id")
    ),
    responses(
        (status = 200, description = "Directory user found", body = DirectoryUser),
        (status = 404, description = "No user with this id", body = ErrorResponse),
    ),
    tag = "users"
)]
#[instrument(skip(users))]
pub async fn get_user(
    State(users): State<SharedUserDirectory>,
    Path(id): Path<u32>,
) -> Result<Json<DirectoryUser>, ErrorResponse> {
    let user = read(&users)?.get(id).cloned();
    user.map(Json).ok_or_else(|| ErrorResponse::not_found("user"))
}

/// Add a directory user; the id is allocated by the directory
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserFields,
    responses(
        (status = 201, description = "Directory user added", body = DirectoryUser),
    ),
    tag = "users"
)]
#[instrument(skip(users, fields))]
pub async fn add_user(
    State(users): State<SharedUserDirectory>,
    Json(fields): Json<UserFields>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let user = write(&users)?.add(fields);
    info!("Added directory user {}", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// Replace the fields of a directory user. Unknown ids are ignored.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(
        ("id" = u32, Path, description = "Directory user id")
    ),
    request_body = UserFields,
    responses(
        (status = 204, description = "Update applied, or nothing to update"),
    ),
    tag = "users"
)]
#[instrument(skip(users, fields))]
pub async fn update_user(
    State(users): State<SharedUserDirectory>,
    Path(id): Path<u32>,
    Json(fields): Json<UserFields>,
) -> Result<StatusCode, ErrorResponse> {
    if !write(&users)?.update(id, fields) {
        info!("Ignoring update for unknown directory user {}", id);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a directory user. Unknown ids are ignored.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(
        ("id" = u32, Path, description = "Directory user id")
    ),
    responses(
        (status = 204, description = "User removed, or nothing to remove"),
    ),
    tag = "users"
)]
#[instrument(skip(users))]
pub async fn delete_user(
    State(users): State<SharedUserDirectory>,
    Path(id): Path<u32>,
) -> Result<StatusCode, ErrorResponse> {
    if !write(&users)?.delete(id) {
        info!("Ignoring delete for unknown directory user {}", id);
    }
    Ok(StatusCode::NO_CONTENT)
}
