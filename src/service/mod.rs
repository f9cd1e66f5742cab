//! Service layer: request orchestration over the repository.
//!
//! [`SalgadoService`] owns the read-after-write and query-precedence
//! rules so that handlers stay a thin HTTP translation.

pub mod salgado_service;

pub use salgado_service::{Lookup, LookupResult, SalgadoService};
