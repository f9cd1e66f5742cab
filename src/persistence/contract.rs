//! Behaviour every [`SalgadoRepository`] backend must show.
//!
//! Records are tagged with a unique name so the checks also hold on a
//! shared database that already contains rows.

use chrono::Utc;

use super::SalgadoRepository;
use crate::domain::{NewSalgado, SalgadoChanges, SalgadoFilter, SalgadoId};

#[allow(clippy::panic)]
pub(crate) async fn exercise(repository: &dyn SalgadoRepository) {
    let tag = format!("contract-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default());
    let new = NewSalgado {
        nome: tag.clone(),
        preco: 5.5,
    };

    // Insert then read back by key.
    let Ok(inserted) = repository.insert(&new).await else {
        panic!("insert failed");
    };
    let Ok(Some(found)) = repository.find_by_key(inserted.id).await else {
        panic!("inserted record not found");
    };
    assert_eq!(found.id, inserted.id);
    assert_eq!(found.nome.as_deref(), Some(tag.as_str()));
    assert_eq!(found.preco, Some(5.5));
    assert!(found.data_inclusao.is_some());

    // Second record with the same name, inserted later.
    let Ok(second) = repository.insert(&new).await else {
        panic!("second insert failed");
    };
    assert!(second.id > inserted.id);

    // Name filter returns exactly the tagged rows in insertion order.
    let Ok(tagged) = repository.find_all(&SalgadoFilter::by_nome(tag.clone())).await else {
        panic!("filtered find_all failed");
    };
    let ids: Vec<SalgadoId> = tagged.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![inserted.id, second.id]);

    let Ok(all) = repository.find_all(&SalgadoFilter::all()).await else {
        panic!("find_all failed");
    };
    assert!(all.windows(2).all(|pair| match pair {
        [a, b] => a.id < b.id,
        _ => true,
    }));
    assert!(all.iter().any(|record| record.id == second.id));

    // Partial update keeps the untouched column.
    let changes = SalgadoChanges {
        nome: None,
        preco: Some(6.25),
    };
    let Ok(updated) = repository.update_by_key(inserted.id, &changes).await else {
        panic!("update failed");
    };
    assert_eq!(updated, 1);
    let Ok(Some(after)) = repository.find_by_key(inserted.id).await else {
        panic!("updated record not found");
    };
    assert_eq!(after.nome.as_deref(), Some(tag.as_str()));
    assert_eq!(after.preco, Some(6.25));

    // Update and delete of a missing key touch nothing.
    let missing = SalgadoId::new(i64::MAX);
    assert!(matches!(repository.update_by_key(missing, &changes).await, Ok(0)));
    assert!(matches!(repository.find_by_key(missing).await, Ok(None)));

    // Delete is idempotent at the row-count level.
    assert!(matches!(repository.delete_by_key(inserted.id).await, Ok(1)));
    assert!(matches!(repository.delete_by_key(inserted.id).await, Ok(0)));
    assert!(matches!(repository.find_by_key(inserted.id).await, Ok(None)));
    assert!(matches!(repository.delete_by_key(second.id).await, Ok(1)));
}
