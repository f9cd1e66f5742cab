//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names on the wire follow the table columns (`nome`, `preco`,
//! `data_inclusao`); request bodies and query strings also accept the
//! English aliases `name` and `price`.

pub mod salgado_dto;

pub use salgado_dto::*;
