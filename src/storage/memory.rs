use async_trait::async_trait;
use tokio::sync::RwLock;

use super::engine::RecordStore;
use crate::core::Result;

/// In-memory record store for tests and embedding. Never fails.
pub struct InMemoryStore<T> {
    name: String,
    records: RwLock<Vec<T>>,
}

impl<T> InMemoryStore<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_records(name, Vec::new())
    }

    pub fn with_records(name: impl Into<String>, records: Vec<T>) -> Self {
        Self {
            name: name.into(),
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl<T> RecordStore<T> for InMemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Vec<T>> {
        Ok(self.records.read().await.clone())
    }

    async fn save(&self, records: &[T]) -> Result<()> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;

    #[tokio::test]
    async fn save_replaces_the_whole_collection() {
        let store = InMemoryStore::with_records(
            "categorie",
            vec![Category {
                id: 1,
                name: "Storia".to_string(),
            }],
        );

        store
            .save(&[Category {
                id: 2,
                name: "Natura".to_string(),
            }])
            .await
            .unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 2);
    }
}
