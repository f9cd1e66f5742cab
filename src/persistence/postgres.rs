//! PostgreSQL implementation of the persistence layer.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use super::models::{SALGADO_COLUMNS, SalgadoRow, into_salgado};
use super::{PersistenceError, SalgadoRepository};
use crate::config::DatabaseConfig;
use crate::domain::{NewSalgado, Salgado, SalgadoChanges, SalgadoFilter, SalgadoId};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS salgado (\
     id BIGSERIAL PRIMARY KEY, \
     nome TEXT, \
     preco DOUBLE PRECISION, \
     data_inclusao TIMESTAMPTZ DEFAULT now())";

/// PostgreSQL-backed repository using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresSalgadoRepository {
    pool: PgPool,
}

impl PostgresSalgadoRepository {
    /// Wraps an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool from `config`, preferring [`DatabaseConfig::url`] over
    /// the discrete options.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the options are malformed or the
    /// server cannot be reached.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, PersistenceError> {
        let options = match &config.url {
            Some(url) => url.parse::<PgConnectOptions>()?,
            None => {
                let mut options = PgConnectOptions::new()
                    .host(&config.host)
                    .username(&config.user)
                    .database(&config.database);
                if !config.password.is_empty() {
                    options = options.password(&config.password);
                }
                if let Some(port) = config.port {
                    options = options.port(port);
                }
                options
            }
        };

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_with(options)
            .await?;

        tracing::debug!(host = %config.host, database = %config.database, "postgres pool opened");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl SalgadoRepository for PostgresSalgadoRepository {
    async fn ensure_schema(&self) -> Result<(), PersistenceError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, new: &NewSalgado) -> Result<Salgado, PersistenceError> {
        let row = sqlx::query_as::<_, SalgadoRow>(&format!(
            "INSERT INTO salgado (nome, preco) VALUES ($1, $2) RETURNING {SALGADO_COLUMNS}"
        ))
        .bind(&new.nome)
        .bind(new.preco)
        .fetch_one(&self.pool)
        .await?;

        Ok(into_salgado(row))
    }

    async fn find_by_key(&self, id: SalgadoId) -> Result<Option<Salgado>, PersistenceError> {
        let row = sqlx::query_as::<_, SalgadoRow>(&format!(
            "SELECT {SALGADO_COLUMNS} FROM salgado WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(into_salgado))
    }

    async fn find_all(&self, filter: &SalgadoFilter) -> Result<Vec<Salgado>, PersistenceError> {
        let rows = if let Some(nome) = &filter.nome {
            sqlx::query_as::<_, SalgadoRow>(&format!(
                "SELECT {SALGADO_COLUMNS} FROM salgado WHERE nome = $1 ORDER BY id ASC"
            ))
            .bind(nome)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, SalgadoRow>(&format!(
                "SELECT {SALGADO_COLUMNS} FROM salgado ORDER BY id ASC"
            ))
            .fetch_all(&self.pool)
            .await
        }?;

        Ok(rows.into_iter().map(into_salgado).collect())
    }

    async fn update_by_key(
        &self,
        id: SalgadoId,
        changes: &SalgadoChanges,
    ) -> Result<u64, PersistenceError> {
        let result = sqlx::query(
            "UPDATE salgado SET nome = COALESCE($1, nome), preco = COALESCE($2, preco) WHERE id = $3",
        )
        .bind(changes.nome.as_deref())
        .bind(changes.preco)
        .bind(id.get())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_by_key(&self, id: SalgadoId) -> Result<u64, PersistenceError> {
        let result = sqlx::query("DELETE FROM salgado WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
