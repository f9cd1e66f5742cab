//! Persistence layer: the salgado table behind a repository trait.
//!
//! [`SalgadoRepository`] is the only seam between the HTTP layer and the
//! store. Concrete backends are `sqlx` pools for MySQL and PostgreSQL plus
//! an in-process table for development and tests. The backend is chosen at
//! startup from [`DatabaseConfig::driver`] by [`connect`].

pub mod memory;
mod models;
pub mod mysql;
pub mod postgres;

#[cfg(test)]
pub(crate) mod contract;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{DatabaseConfig, DatabaseDriver};
use crate::domain::{NewSalgado, Salgado, SalgadoChanges, SalgadoFilter, SalgadoId};

pub use memory::InMemorySalgadoRepository;
pub use mysql::MySqlSalgadoRepository;
pub use postgres::PostgresSalgadoRepository;

/// Failures raised by a persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The store could not be reached or the pool gave up waiting for a
    /// connection.
    #[error("database unavailable: {0}")]
    Connectivity(String),

    /// The store rejected the values (type, null or integrity violation).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Invalid connection options.
    #[error("invalid database configuration: {0}")]
    Configuration(String),

    /// Any other driver failure (decode, protocol, unexpected SQL error).
    #[error("query failed: {0}")]
    Query(String),
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => {
                let kind = db.kind();
                // SQLSTATE class 22 = data exception, 23 = integrity violation.
                let data_or_integrity = db
                    .code()
                    .is_some_and(|code| code.starts_with("22") || code.starts_with("23"));
                if !matches!(kind, sqlx::error::ErrorKind::Other) || data_or_integrity {
                    Self::Constraint(db.to_string())
                } else {
                    Self::Query(db.to_string())
                }
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Connectivity(err.to_string()),
            sqlx::Error::Configuration(_) => Self::Configuration(err.to_string()),
            other => Self::Query(other.to_string()),
        }
    }
}

/// Storage contract for salgado records.
///
/// Every method is a single self-contained statement against the store;
/// implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait SalgadoRepository: Send + Sync + std::fmt::Debug {
    /// Creates the `salgado` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the DDL statement fails.
    async fn ensure_schema(&self) -> Result<(), PersistenceError> {
        Ok(())
    }

    /// Inserts a record and returns it with the assigned id.
    ///
    /// Column defaults filled by the store (such as `data_inclusao`) may
    /// be missing from the returned value; re-read with
    /// [`SalgadoRepository::find_by_key`] to observe them.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] on store or constraint failure.
    async fn insert(&self, new: &NewSalgado) -> Result<Salgado, PersistenceError>;

    /// Looks a record up by primary key.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] on store failure. A missing record is
    /// `Ok(None)`.
    async fn find_by_key(&self, id: SalgadoId) -> Result<Option<Salgado>, PersistenceError>;

    /// Returns every record passing `filter`, ordered by id.
    ///
    /// Name equality follows the store's collation: MySQL's default
    /// collation compares case-insensitively, while PostgreSQL and the
    /// in-memory table compare exactly.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] on store failure.
    async fn find_all(&self, filter: &SalgadoFilter) -> Result<Vec<Salgado>, PersistenceError>;

    /// Overwrites the supplied fields of the record with key `id` and
    /// returns the number of rows affected (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] on store or constraint failure.
    async fn update_by_key(
        &self,
        id: SalgadoId,
        changes: &SalgadoChanges,
    ) -> Result<u64, PersistenceError>;

    /// Removes the record with key `id` and returns the number of rows
    /// deleted (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] on store failure.
    async fn delete_by_key(&self, id: SalgadoId) -> Result<u64, PersistenceError>;
}

/// Builds the repository selected by `config.driver`.
///
/// SQL backends open their pool eagerly so that an unreachable store fails
/// startup. When [`DatabaseConfig::ensure_schema`] is set the table is
/// created if missing.
///
/// # Errors
///
/// Returns [`PersistenceError::Connectivity`] if the store cannot be
/// reached, or [`PersistenceError::Configuration`] for malformed options.
pub async fn connect(
    config: &DatabaseConfig,
) -> Result<Arc<dyn SalgadoRepository>, PersistenceError> {
    let repository: Arc<dyn SalgadoRepository> = match config.driver {
        DatabaseDriver::MySql => Arc::new(MySqlSalgadoRepository::connect(config).await?),
        DatabaseDriver::Postgres => Arc::new(PostgresSalgadoRepository::connect(config).await?),
        DatabaseDriver::Memory => Arc::new(InMemorySalgadoRepository::new()),
    };

    if config.ensure_schema {
        repository.ensure_schema().await?;
    }

    tracing::info!(driver = %config.driver, "persistence ready");
    Ok(repository)
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use axum::http::StatusCode;
    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;
    use crate::error::ApiError;

    /// Server-side error carrying a fixed SQLSTATE.
    #[derive(Debug)]
    struct ServerError {
        code: &'static str,
        unique_violation: bool,
    }

    impl fmt::Display for ServerError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "server rejected statement ({})", self.code)
        }
    }

    impl StdError for ServerError {}

    impl DatabaseError for ServerError {
        fn message(&self) -> &str {
            "server rejected statement"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.unique_violation {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::Other
            }
        }
    }

    fn server_error(code: &'static str, unique_violation: bool) -> PersistenceError {
        PersistenceError::from(sqlx::Error::Database(Box::new(ServerError {
            code,
            unique_violation,
        })))
    }

    #[test]
    fn data_and_integrity_sqlstates_are_constraint_errors() {
        for code in ["22003", "22001", "23000", "23502"] {
            let err = server_error(code, false);
            assert!(
                matches!(err, PersistenceError::Constraint(_)),
                "{code} classified as {err:?}"
            );
            assert_eq!(
                ApiError::from(err).status_code(),
                StatusCode::UNPROCESSABLE_ENTITY
            );
        }
    }

    #[test]
    fn other_sqlstates_are_query_errors() {
        for code in ["HY000", "42S02", "42P01"] {
            let err = server_error(code, false);
            assert!(
                matches!(err, PersistenceError::Query(_)),
                "{code} classified as {err:?}"
            );
            assert_eq!(
                ApiError::from(err).status_code(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[test]
    fn classified_violation_kind_is_constraint_error() {
        let err = server_error("HY000", true);
        assert!(matches!(err, PersistenceError::Constraint(_)));
        assert_eq!(ApiError::from(err).error_code(), 4001);
    }

    #[test]
    fn pool_timeout_is_connectivity() {
        let err = PersistenceError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, PersistenceError::Connectivity(_)));
    }

    #[test]
    fn io_error_is_connectivity() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = PersistenceError::from(sqlx::Error::Io(io));
        assert!(matches!(err, PersistenceError::Connectivity(_)));
    }

    #[test]
    fn row_not_found_is_query_error() {
        let err = PersistenceError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, PersistenceError::Query(_)));
    }

    #[tokio::test]
    async fn memory_driver_needs_no_server() {
        let config = DatabaseConfig {
            driver: DatabaseDriver::Memory,
            ..DatabaseConfig::default()
        };
        let repository = tokio_test::assert_ok!(connect(&config).await);
        let all = tokio_test::assert_ok!(repository.find_all(&SalgadoFilter::all()).await);
        assert!(all.is_empty());
    }
}
