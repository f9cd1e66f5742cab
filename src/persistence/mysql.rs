//! MySQL implementation of the persistence layer.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};

use super::models::{SALGADO_COLUMNS, SalgadoRow, into_salgado};
use super::{PersistenceError, SalgadoRepository};
use crate::config::DatabaseConfig;
use crate::domain::{NewSalgado, Salgado, SalgadoChanges, SalgadoFilter, SalgadoId};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS salgado (\
     id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY, \
     nome TEXT, \
     preco DOUBLE, \
     data_inclusao TIMESTAMP NULL DEFAULT CURRENT_TIMESTAMP)";

/// MySQL-backed repository using `sqlx::MySqlPool`.
#[derive(Debug, Clone)]
pub struct MySqlSalgadoRepository {
    pool: MySqlPool,
}

impl MySqlSalgadoRepository {
    /// Wraps an existing connection pool.
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Opens a pool from `config`, preferring [`DatabaseConfig::url`] over
    /// the discrete host/user/password/database options.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the options are malformed or the
    /// server cannot be reached.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, PersistenceError> {
        let options = match &config.url {
            Some(url) => url.parse::<MySqlConnectOptions>()?,
            None => {
                let mut options = MySqlConnectOptions::new()
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

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_with(options)
            .await?;

        tracing::debug!(host = %config.host, database = %config.database, "mysql pool opened");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl SalgadoRepository for MySqlSalgadoRepository {
    async fn ensure_schema(&self) -> Result<(), PersistenceError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, new: &NewSalgado) -> Result<Salgado, PersistenceError> {
        let result = sqlx::query("INSERT INTO salgado (nome, preco) VALUES (?, ?)")
            .bind(&new.nome)
            .bind(new.preco)
            .execute(&self.pool)
            .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|e| PersistenceError::Query(format!("insert id out of range: {e}")))?;

        Ok(Salgado {
            id: SalgadoId::new(id),
            nome: Some(new.nome.clone()),
            preco: Some(new.preco),
            data_inclusao: None,
        })
    }

    async fn find_by_key(&self, id: SalgadoId) -> Result<Option<Salgado>, PersistenceError> {
        let row = sqlx::query_as::<_, SalgadoRow>(&format!(
            "SELECT {SALGADO_COLUMNS} FROM salgado WHERE id = ?"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(into_salgado))
    }

    async fn find_all(&self, filter: &SalgadoFilter) -> Result<Vec<Salgado>, PersistenceError> {
        let rows = if let Some(nome) = &filter.nome {
            sqlx::query_as::<_, SalgadoRow>(&format!(
                "SELECT {SALGADO_COLUMNS} FROM salgado WHERE nome = ? ORDER BY id ASC"
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
            "UPDATE salgado SET nome = COALESCE(?, nome), preco = COALESCE(?, preco) WHERE id = ?",
        )
        .bind(changes.nome.as_deref())
        .bind(changes.preco)
        .bind(id.get())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_by_key(&self, id: SalgadoId) -> Result<u64, PersistenceError> {
        let result = sqlx::query("DELETE FROM salgado WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
