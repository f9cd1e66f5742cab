//! In-process repository for development and tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{PersistenceError, SalgadoRepository};
use crate::domain::{NewSalgado, Salgado, SalgadoChanges, SalgadoFilter, SalgadoId};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<SalgadoId, Salgado>,
}

/// Volatile salgado table kept in a `BTreeMap` behind a
/// [`tokio::sync::RwLock`].
///
/// Ids start at 1 and are never reused, and `data_inclusao` is stamped on
/// insert, matching the SQL column defaults. Data is lost when the last
/// clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemorySalgadoRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemorySalgadoRepository {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` as is, advancing the id sequence past its key.
    #[cfg(test)]
    pub(crate) async fn put_raw(&self, record: Salgado) {
        let mut table = self.table.write().await;
        table.last_id = table.last_id.max(record.id.get());
        table.rows.insert(record.id, record);
    }
}

#[async_trait]
impl SalgadoRepository for InMemorySalgadoRepository {
    async fn insert(&self, new: &NewSalgado) -> Result<Salgado, PersistenceError> {
        let mut table = self.table.write().await;
        let next = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| PersistenceError::Constraint("id sequence exhausted".to_string()))?;
        table.last_id = next;

        let record = Salgado {
            id: SalgadoId::new(next),
            nome: Some(new.nome.clone()),
            preco: Some(new.preco),
            data_inclusao: Some(Utc::now()),
        };
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_key(&self, id: SalgadoId) -> Result<Option<Salgado>, PersistenceError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_all(&self, filter: &SalgadoFilter) -> Result<Vec<Salgado>, PersistenceError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn update_by_key(
        &self,
        id: SalgadoId,
        changes: &SalgadoChanges,
    ) -> Result<u64, PersistenceError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(record) => {
                changes.apply_to(record);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_key(&self, id: SalgadoId) -> Result<u64, PersistenceError> {
        let mut table = self.table.write().await;
        Ok(u64::from(table.rows.remove(&id).is_some()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn satisfies_repository_contract() {
        let repository = InMemorySalgadoRepository::new();
        super::super::contract::exercise(&repository).await;
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repository = InMemorySalgadoRepository::new();
        let new = NewSalgado {
            nome: "Pastel".to_string(),
            preco: 7.0,
        };
        let Ok(first) = repository.insert(&new).await else {
            panic!("insert failed");
        };
        let _ = repository.delete_by_key(first.id).await;
        let Ok(second) = repository.insert(&new).await else {
            panic!("insert failed");
        };
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn clones_share_the_same_table() {
        let repository = InMemorySalgadoRepository::new();
        let clone = repository.clone();
        let Ok(record) = repository
            .insert(&NewSalgado {
                nome: "Esfiha".to_string(),
                preco: 4.0,
            })
            .await
        else {
            panic!("insert failed");
        };
        let found = clone.find_by_key(record.id).await.ok().flatten();
        assert_eq!(found, Some(record));
    }

    #[tokio::test]
    async fn nameless_rows_are_listed_but_never_match_a_name() {
        let repository = InMemorySalgadoRepository::new();
        repository
            .put_raw(Salgado {
                id: SalgadoId::new(1),
                nome: None,
                preco: None,
                data_inclusao: None,
            })
            .await;

        let all = tokio_test::assert_ok!(repository.find_all(&SalgadoFilter::all()).await);
        assert_eq!(all.len(), 1);
        let named = tokio_test::assert_ok!(repository.find_all(&SalgadoFilter::by_nome("")).await);
        assert!(named.is_empty());

        let Ok(next) = repository
            .insert(&NewSalgado {
                nome: "Kibe".to_string(),
                preco: 4.0,
            })
            .await
        else {
            panic!("insert failed");
        };
        assert_eq!(next.id, SalgadoId::new(2));
    }
}
