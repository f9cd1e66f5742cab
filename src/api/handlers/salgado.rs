//! Salgado CRUD handlers: create, update, read, delete.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{patch, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreateSalgadoRequest, DeleteSalgadoResponse, ReadSalgadoParams, ReadSalgadoResponse,
    SalgadoResponse, UpdateSalgadoRequest,
};
use crate::api::extract::JsonBody;
use crate::app_state::AppState;
use crate::domain::{NewSalgado, SalgadoChanges, SalgadoId};
use crate::error::{ApiError, ErrorResponse};
use crate::service::{Lookup, LookupResult};

/// `POST /salgado` — Create a record.
///
/// # Errors
///
/// Returns [`ApiError`] on invalid input or persistence failure.
#[utoipa::path(
    post,
    path = "/salgado",
    tag = "Salgado",
    summary = "Create a salgado",
    description = "Inserts a record and returns it as stored, including the server-assigned `id` and `data_inclusao`.",
    request_body = CreateSalgadoRequest,
    responses(
        (status = 200, description = "Created record", body = SalgadoResponse),
        (status = 400, description = "Malformed or invalid body", body = ErrorResponse),
        (status = 422, description = "Rejected by the store", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    )
)]
pub async fn create_salgado(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateSalgadoRequest>,
) -> Result<Json<Option<SalgadoResponse>>, ApiError> {
    let new = NewSalgado::try_from(req)?;
    let created = state.salgado_service.create(new).await?;
    Ok(Json(created.map(SalgadoResponse::from)))
}

/// `PATCH /salgado/{id}` — Overwrite the supplied fields of a record.
///
/// Responds with `null` when no record has that id.
///
/// # Errors
///
/// Returns [`ApiError`] on invalid input or persistence failure.
#[utoipa::path(
    patch,
    path = "/salgado/{id}",
    tag = "Salgado",
    summary = "Update a salgado",
    description = "Overwrites `nome` and/or `preco` on the record and returns its post-update state, or `null` if the id does not exist.",
    params(
        ("id" = i64, Path, description = "Record id"),
    ),
    request_body = UpdateSalgadoRequest,
    responses(
        (status = 200, description = "Updated record, or null", body = SalgadoResponse),
        (status = 400, description = "Malformed or invalid input", body = ErrorResponse),
        (status = 422, description = "Rejected by the store", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    )
)]
pub async fn update_salgado(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(req): JsonBody<UpdateSalgadoRequest>,
) -> Result<Json<Option<SalgadoResponse>>, ApiError> {
    let id = parse_id(&raw_id)?;
    let changes = SalgadoChanges::try_from(req)?;
    let updated = state.salgado_service.update(id, changes).await?;
    Ok(Json(updated.map(SalgadoResponse::from)))
}

/// `GET /salgado` — Read by id, by name, or everything.
///
/// `id` takes precedence over `nome`; empty values count as absent.
///
/// # Errors
///
/// Returns [`ApiError`] on a non-integer id or persistence failure.
#[utoipa::path(
    get,
    path = "/salgado",
    tag = "Salgado",
    summary = "Read salgados",
    description = "With `id`: the matching record or `null`. With `nome`: every record with that exact name. Without parameters: every record in insertion order.",
    params(ReadSalgadoParams),
    responses(
        (status = 200, description = "Single record (or null) when `id` is given, otherwise an array", body = ReadSalgadoResponse),
        (status = 400, description = "Non-integer id", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    )
)]
pub async fn read_salgado(
    State(state): State<AppState>,
    params: Result<Query<ReadSalgadoParams>, QueryRejection>,
) -> Result<Json<ReadSalgadoResponse>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

    let id = non_empty(params.id).map(|raw| parse_id(&raw)).transpose()?;
    let lookup = Lookup::from_params(id, non_empty(params.nome));

    let response = match state.salgado_service.lookup(lookup).await? {
        LookupResult::One(record) => ReadSalgadoResponse::One(record.map(SalgadoResponse::from)),
        LookupResult::Many(records) => {
            ReadSalgadoResponse::Many(records.into_iter().map(SalgadoResponse::from).collect())
        }
    };
    Ok(Json(response))
}

/// `DELETE /salgado/{id}` — Remove a record.
///
/// # Errors
///
/// Returns [`ApiError`] on a non-integer id or persistence failure.
#[utoipa::path(
    delete,
    path = "/salgado/{id}",
    tag = "Salgado",
    summary = "Delete a salgado",
    description = "Removes the record and reports how many rows were deleted (0 if the id did not exist).",
    params(
        ("id" = i64, Path, description = "Record id"),
    ),
    responses(
        (status = 200, description = "Rows deleted", body = DeleteSalgadoResponse),
        (status = 400, description = "Non-integer id", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    )
)]
pub async fn delete_salgado(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteSalgadoResponse>, ApiError> {
    let id = parse_id(&raw_id)?;
    let rows_deleted = state.salgado_service.delete(id).await?;
    Ok(Json(DeleteSalgadoResponse { rows_deleted }))
}

/// Salgado routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/salgado", post(create_salgado).get(read_salgado))
        .route("/salgado/{id}", patch(update_salgado).delete(delete_salgado))
}

fn parse_id(raw: &str) -> Result<SalgadoId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Validation(format!("id must be an integer, got {raw:?}")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
