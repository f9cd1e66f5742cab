//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use super::handlers::{salgado, system};

/// OpenAPI description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "salgado-api",
        description = "CRUD over the salgado table: name, price and inclusion date."
    ),
    paths(
        salgado::create_salgado,
        salgado::update_salgado,
        salgado::read_salgado,
        salgado::delete_salgado,
        system::health_handler,
    ),
    tags(
        (name = "Salgado", description = "Create, read, update and delete salgados"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;
