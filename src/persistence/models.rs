//! Row shape shared by the SQL backends.

use chrono::{DateTime, Utc};

use crate::domain::{Salgado, SalgadoId};

/// Column list selected by every read, in [`SalgadoRow`] order.
pub(crate) const SALGADO_COLUMNS: &str = "id, nome, preco, data_inclusao";

/// A raw `salgado` row as decoded by `sqlx::query_as`. Every column but
/// `id` is nullable.
pub(crate) type SalgadoRow = (i64, Option<String>, Option<f64>, Option<DateTime<Utc>>);

/// Converts a decoded row into the domain record.
pub(crate) fn into_salgado((id, nome, preco, data_inclusao): SalgadoRow) -> Salgado {
    Salgado {
        id: SalgadoId::new(id),
        nome,
        preco,
        data_inclusao,
    }
}
