//! Turns caller-supplied ids into embedded snapshots.
//!
//! Resolution is all-or-nothing: the first id without a match fails the whole
//! call with [`CatalogError::ReferenceNotFound`].

use std::collections::HashSet;

use crate::core::{
    CatalogError, Category, Municipality, Record, RecordId, Result, TourCategory, TourRef,
};
use crate::storage::{Collections, RecordStore, find_by_id};

pub struct ReferenceResolver<'a> {
    collections: &'a Collections,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(collections: &'a Collections) -> Self {
        Self { collections }
    }

    pub async fn resolve_categories(&self, ids: &[RecordId]) -> Result<Vec<Category>> {
        load_and_resolve(self.collections.categories.as_ref(), ids, "category").await
    }

    pub async fn resolve_tour_categories(&self, ids: &[RecordId]) -> Result<Vec<TourCategory>> {
        load_and_resolve(self.collections.tour_categories.as_ref(), ids, "tour category").await
    }

    pub async fn resolve_tours(&self, ids: &[RecordId]) -> Result<Vec<TourRef>> {
        let tours = load_and_resolve(self.collections.tours.as_ref(), ids, "tour").await?;
        Ok(tours.iter().map(TourRef::from).collect())
    }

    /// Points of interest carry their municipality by name, so the lookup is by
    /// exact `nome`. The first match wins.
    pub async fn resolve_municipality(&self, nome: &str) -> Result<Municipality> {
        let municipalities = self.collections.municipalities.load().await?;
        municipalities
            .into_iter()
            .find(|municipality| municipality.nome == nome)
            .ok_or_else(|| CatalogError::ReferenceNotFound {
                entity: "municipality",
                key: nome.to_string(),
            })
    }
}

async fn load_and_resolve<T>(
    store: &dyn RecordStore<T>,
    ids: &[RecordId],
    entity: &'static str,
) -> Result<Vec<T>>
where
    T: Record + Clone + Send + Sync + 'static,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let records = store.load().await?;
    resolve_ids(&records, ids, entity)
}

/// Picks the records matching `ids`, in input order, ignoring repeated ids.
pub fn resolve_ids<T>(records: &[T], ids: &[RecordId], entity: &'static str) -> Result<Vec<T>>
where
    T: Record + Clone,
{
    let mut seen = HashSet::with_capacity(ids.len());
    let mut resolved = Vec::with_capacity(ids.len());
    for &id in ids {
        if !seen.insert(id) {
            continue;
        }
        let record = find_by_id(records, id)
            .ok_or_else(|| CatalogError::missing_reference(entity, id))?;
        resolved.push(record.clone());
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use std::sync::Arc;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: 1,
                name: "Arte".to_string(),
            },
            Category {
                id: 5,
                name: "Storia".to_string(),
            },
        ]
    }

    #[test]
    fn resolves_in_input_order() {
        let resolved = resolve_ids(&categories(), &[5, 1], "category").unwrap();
        assert_eq!(resolved[0].name, "Storia");
        assert_eq!(resolved[1].name, "Arte");
    }

    #[test]
    fn repeated_ids_resolve_once() {
        let resolved = resolve_ids(&categories(), &[5, 5, 1], "category").unwrap();
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn any_missing_id_fails_the_whole_resolution() {
        let err = resolve_ids(&categories(), &[1, 9, 5], "category").unwrap_err();
        match err {
            CatalogError::ReferenceNotFound { entity, key } => {
                assert_eq!(entity, "category");
                assert_eq!(key, "9");
            }
            other => panic!("expected missing reference, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn resolver_reads_the_referenced_collection() {
        let mut collections = Collections::in_memory();
        collections.categories = Arc::new(InMemoryStore::with_records("categorie", categories()));
        let resolver = ReferenceResolver::new(&collections);

        let resolved = resolver.resolve_categories(&[1]).await.unwrap();
        assert_eq!(resolved, vec![categories()[0].clone()]);

        assert!(resolver.resolve_tours(&[]).await.unwrap().is_empty());
        assert!(matches!(
            resolver.resolve_tours(&[3]).await,
            Err(CatalogError::ReferenceNotFound { entity: "tour", .. })
        ));
        assert!(resolver.resolve_municipality("Enna").await.is_err());
    }
}
