//! # salgado-api
//!
//! REST API over a single relational table, `salgado` (name, price and
//! inclusion date), with create, read (by id, by name or all), update and
//! delete. Each operation is one repository call plus, for writes, a
//! re-read so responses show the columns the store assigned.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── SalgadoService (service/)
//!     │
//!     └── SalgadoRepository (persistence/)
//!           ├── MySQL (sqlx)
//!           ├── PostgreSQL (sqlx)
//!           └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod telemetry;
