//! Salgado DTOs for create, update, read and delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{NewSalgado, Salgado, SalgadoChanges};
use crate::error::ApiError;

/// Request body for `POST /salgado`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSalgadoRequest {
    /// Display name (alias `name`).
    #[serde(alias = "name")]
    #[schema(example = "Coxinha")]
    pub nome: String,
    /// Unit price (alias `price`).
    #[serde(alias = "price")]
    #[schema(example = 5.5)]
    pub preco: f64,
}

impl TryFrom<CreateSalgadoRequest> for NewSalgado {
    type Error = ApiError;

    fn try_from(req: CreateSalgadoRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            nome: validate_nome(req.nome)?,
            preco: validate_preco(req.preco)?,
        })
    }
}

/// Request body for `PATCH /salgado/{id}`. Omitted fields are left as is.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSalgadoRequest {
    /// Replacement name (alias `name`).
    #[serde(default, alias = "name")]
    pub nome: Option<String>,
    /// Replacement price (alias `price`).
    #[serde(default, alias = "price")]
    pub preco: Option<f64>,
}

impl TryFrom<UpdateSalgadoRequest> for SalgadoChanges {
    type Error = ApiError;

    fn try_from(req: UpdateSalgadoRequest) -> Result<Self, Self::Error> {
        let changes = Self {
            nome: req.nome.map(validate_nome).transpose()?,
            preco: req.preco.map(validate_preco).transpose()?,
        };
        if changes.is_empty() {
            return Err(ApiError::Validation(
                "body must set at least one of nome, preco".to_string(),
            ));
        }
        Ok(changes)
    }
}

fn validate_nome(nome: String) -> Result<String, ApiError> {
    if nome.trim().is_empty() {
        return Err(ApiError::Validation("nome must not be blank".to_string()));
    }
    Ok(nome)
}

fn validate_preco(preco: f64) -> Result<f64, ApiError> {
    if !preco.is_finite() {
        return Err(ApiError::Validation("preco must be a finite number".to_string()));
    }
    Ok(preco)
}

/// Query parameters for `GET /salgado`.
///
/// Kept as raw strings so that an empty value (`?id=`) counts as absent.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReadSalgadoParams {
    /// Primary key; takes precedence over `nome`.
    #[serde(default)]
    #[param(value_type = Option<i64>)]
    pub id: Option<String>,
    /// Exact name filter (alias `name`).
    #[serde(default, alias = "name")]
    pub nome: Option<String>,
}

/// A salgado record as returned by every endpoint.
///
/// Columns that are NULL in the store serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalgadoResponse {
    /// Primary key.
    #[schema(example = 1)]
    pub id: i64,
    /// Display name.
    #[schema(example = "Coxinha")]
    pub nome: Option<String>,
    /// Unit price.
    #[schema(example = 5.5)]
    pub preco: Option<f64>,
    /// Inclusion timestamp assigned by the store.
    pub data_inclusao: Option<DateTime<Utc>>,
}

impl From<Salgado> for SalgadoResponse {
    fn from(record: Salgado) -> Self {
        Self {
            id: record.id.get(),
            nome: record.nome,
            preco: record.preco,
            data_inclusao: record.data_inclusao,
        }
    }
}

/// Response body for `GET /salgado`: a single record (or `null`) when
/// queried by id, otherwise an array.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ReadSalgadoResponse {
    /// Lookup by id.
    One(Option<SalgadoResponse>),
    /// Lookup by name or unfiltered.
    Many(Vec<SalgadoResponse>),
}

/// Response body for `DELETE /salgado/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteSalgadoResponse {
    /// Rows removed: 1 if the id existed, 0 otherwise.
    pub rows_deleted: u64,
}
