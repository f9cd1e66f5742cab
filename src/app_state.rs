//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::SalgadoRepository;
use crate::service::SalgadoService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Salgado service wrapping the injected repository.
    pub salgado_service: Arc<SalgadoService>,
}

impl AppState {
    /// Builds the state around an already connected repository.
    #[must_use]
    pub fn new(repository: Arc<dyn SalgadoRepository>) -> Self {
        Self {
            salgado_service: Arc::new(SalgadoService::new(repository)),
        }
    }
}
