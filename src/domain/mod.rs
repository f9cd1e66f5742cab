//! Domain layer: the salgado record and its identifier.
//!
//! The types here are storage-agnostic. Every persistence backend reads
//! and writes [`Salgado`] values and selects them with [`SalgadoFilter`].

pub mod salgado;
pub mod salgado_id;

pub use salgado::{NewSalgado, Salgado, SalgadoChanges, SalgadoFilter};
pub use salgado_id::SalgadoId;
