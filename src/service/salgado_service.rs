//! Salgado service: one repository call per operation, plus the re-read
//! that makes responses reflect server-assigned columns.

use std::sync::Arc;

use crate::domain::{NewSalgado, Salgado, SalgadoChanges, SalgadoFilter, SalgadoId};
use crate::persistence::{PersistenceError, SalgadoRepository};

/// Which records a read selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// One record by primary key.
    ById(SalgadoId),
    /// Every record with this exact name.
    ByNome(String),
    /// Every record.
    All,
}

impl Lookup {
    /// Resolves optional query inputs into a lookup. `id` wins over `nome`.
    #[must_use]
    pub fn from_params(id: Option<SalgadoId>, nome: Option<String>) -> Self {
        match (id, nome) {
            (Some(id), _) => Self::ById(id),
            (None, Some(nome)) => Self::ByNome(nome),
            (None, None) => Self::All,
        }
    }
}

/// Outcome of a [`Lookup`].
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    /// Result of [`Lookup::ById`].
    One(Option<Salgado>),
    /// Result of [`Lookup::ByNome`] or [`Lookup::All`], ordered by id.
    Many(Vec<Salgado>),
}

/// Stateless coordinator over a shared [`SalgadoRepository`].
#[derive(Debug, Clone)]
pub struct SalgadoService {
    repository: Arc<dyn SalgadoRepository>,
}

impl SalgadoService {
    /// Creates a service over `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn SalgadoRepository>) -> Self {
        Self { repository }
    }

    /// Inserts a record and re-reads it by the assigned id.
    ///
    /// Returns `None` only if the row was removed between the two calls.
    ///
    /// # Errors
    ///
    /// Propagates any [`PersistenceError`] unchanged.
    pub async fn create(&self, new: NewSalgado) -> Result<Option<Salgado>, PersistenceError> {
        let inserted = self.repository.insert(&new).await?;
        tracing::info!(id = %inserted.id, nome = ?inserted.nome, "salgado created");
        self.repository.find_by_key(inserted.id).await
    }

    /// Applies `changes` to record `id` and re-reads it.
    ///
    /// A missing id is not an error: nothing is written and `None` is
    /// returned.
    ///
    /// # Errors
    ///
    /// Propagates any [`PersistenceError`] unchanged.
    pub async fn update(
        &self,
        id: SalgadoId,
        changes: SalgadoChanges,
    ) -> Result<Option<Salgado>, PersistenceError> {
        let affected = self.repository.update_by_key(id, &changes).await?;
        tracing::info!(%id, affected, "salgado updated");
        self.repository.find_by_key(id).await
    }

    /// Runs a read.
    ///
    /// # Errors
    ///
    /// Propagates any [`PersistenceError`] unchanged.
    pub async fn lookup(&self, lookup: Lookup) -> Result<LookupResult, PersistenceError> {
        match lookup {
            Lookup::ById(id) => self.repository.find_by_key(id).await.map(LookupResult::One),
            Lookup::ByNome(nome) => self
                .repository
                .find_all(&SalgadoFilter::by_nome(nome))
                .await
                .map(LookupResult::Many),
            Lookup::All => self
                .repository
                .find_all(&SalgadoFilter::all())
                .await
                .map(LookupResult::Many),
        }
    }

    /// Deletes record `id` and returns the number of rows removed (0 or 1).
    ///
    /// # Errors
    ///
    /// Propagates any [`PersistenceError`] unchanged.
    pub async fn delete(&self, id: SalgadoId) -> Result<u64, PersistenceError> {
        let deleted = self.repository.delete_by_key(id).await?;
        tracing::info!(%id, deleted, "salgado delete");
        Ok(deleted)
    }
}
