//! The salgado record and the value types used to create, change and
//! select it.

use chrono::{DateTime, Utc};

use super::SalgadoId;

/// A stored salgado row.
///
/// `id` and `data_inclusao` are assigned by the store; `nome` and `preco`
/// come from the caller. The table leaves `nome` and `preco` nullable, so
/// rows written by older clients may carry neither.
#[derive(Debug, Clone, PartialEq)]
pub struct Salgado {
    /// Auto-increment primary key.
    pub id: SalgadoId,
    /// Display name. Not unique.
    pub nome: Option<String>,
    /// Unit price.
    pub preco: Option<f64>,
    /// Inclusion timestamp, filled by the column default on insert.
    pub data_inclusao: Option<DateTime<Utc>>,
}

/// Caller-supplied fields for a new record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSalgado {
    /// Display name.
    pub nome: String,
    /// Unit price.
    pub preco: f64,
}

/// Partial overwrite applied by an update. `None` leaves the column as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalgadoChanges {
    /// Replacement name.
    pub nome: Option<String>,
    /// Replacement price.
    pub preco: Option<f64>,
}

impl SalgadoChanges {
    /// Returns `true` when no column would be touched.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nome.is_none() && self.preco.is_none()
    }

    /// Applies the supplied fields to `record` in place.
    pub fn apply_to(&self, record: &mut Salgado) {
        if let Some(nome) = &self.nome {
            record.nome = Some(nome.clone());
        }
        if let Some(preco) = self.preco {
            record.preco = Some(preco);
        }
    }
}

/// Equality filter for list queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalgadoFilter {
    /// Exact match on `nome`. `None` selects every record.
    pub nome: Option<String>,
}

impl SalgadoFilter {
    /// Filter selecting every record.
    #[must_use]
    pub const fn all() -> Self {
        Self { nome: None }
    }

    /// Filter selecting records whose `nome` equals `nome`.
    #[must_use]
    pub fn by_nome(nome: impl Into<String>) -> Self {
        Self {
            nome: Some(nome.into()),
        }
    }

    /// Returns `true` if `record` passes this filter.
    ///
    /// Names compare byte for byte. A record without a name only passes
    /// the unfiltered selection.
    #[must_use]
    pub fn matches(&self, record: &Salgado) -> bool {
        self.nome
            .as_deref()
            .is_none_or(|nome| record.nome.as_deref() == Some(nome))
    }
}
