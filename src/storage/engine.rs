use async_trait::async_trait;

use crate::core::{Record, RecordId, Result};

/// Whole-collection storage backend - one per entity type.
///
/// Every operation moves the entire collection; there is no partial update and
/// no index. Implementations do not coordinate concurrent callers.
#[async_trait]
pub trait RecordStore<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Logical name used in logs (usually the file name).
    fn name(&self) -> &str;

    /// Load the full collection in stored order.
    async fn load(&self) -> Result<Vec<T>>;

    /// Replace the full collection.
    async fn save(&self, records: &[T]) -> Result<()>;
}

/// `max(id) + 1`, or `1` for an empty collection.
///
/// Ids are never reassigned while a higher id exists.
pub fn next_id<T: Record>(records: &[T]) -> RecordId {
    records
        .iter()
        .map(Record::id)
        .max()
        .map_or(1, |max| max + 1)
}

/// Linear scan by id.
pub fn find_by_id<T: Record>(records: &[T], id: RecordId) -> Option<&T> {
    records.iter().find(|record| record.id() == id)
}

pub fn position_of<T: Record>(records: &[T], id: RecordId) -> Option<usize> {
    records.iter().position(|record| record.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;

    fn category(id: RecordId) -> Category {
        Category {
            id,
            name: format!("cat-{id}"),
        }
    }

    #[test]
    fn next_id_starts_at_one() {
        let empty: Vec<Category> = Vec::new();
        assert_eq!(next_id(&empty), 1);
    }

    #[test]
    fn next_id_follows_the_maximum() {
        assert_eq!(next_id(&[category(3), category(7)]), 8);
        assert_eq!(next_id(&[category(7), category(3)]), 8);
    }

    #[test]
    fn deleted_maximum_is_not_reused_while_higher_ids_exist() {
        let mut records = vec![category(3), category(7), category(9)];
        records.retain(|record| record.id != 7);
        assert_eq!(next_id(&records), 10);
    }

    #[test]
    fn lookup_helpers_scan_linearly() {
        let records = vec![category(4), category(2)];
        assert_eq!(find_by_id(&records, 2).map(|c| c.name.as_str()), Some("cat-2"));
        assert_eq!(position_of(&records, 4), Some(0));
        assert!(find_by_id(&records, 5).is_none());
    }
}
