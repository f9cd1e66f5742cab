//! REST endpoint handlers organized by resource.

pub mod salgado;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(salgado::routes())
        .merge(system::routes())
}
