//! REST API layer: route handlers, DTOs, extractors and router composition.
//!
//! Resource routes are mounted at the root (`/salgado`), next to the
//! system endpoints.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod openapi;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new().merge(handlers::routes());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
}

/// Builds the served application: routes, shared state and middleware.
///
/// `request_timeout` of `None` leaves requests unbounded at this layer.
pub fn build_app(state: AppState, request_timeout: Option<Duration>) -> Router {
    let router = build_router().layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let router = match request_timeout {
        Some(timeout) => router.layer(timeout_layer(timeout)),
        None => router,
    };

    router.with_state(state)
}

/// Aborts requests running longer than `timeout` with `408 Request Timeout`.
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
