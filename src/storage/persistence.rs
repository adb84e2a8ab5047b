//! JSON-file record store.
//!
//! Each collection is one pretty-printed JSON array. Writes go to a sibling
//! `.tmp` file that is then renamed over the target.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{debug, info};

use super::engine::RecordStore;
use crate::core::{CatalogError, Result};

pub struct JsonFileStore<T> {
    path: PathBuf,
    name: String,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            name,
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file as an empty array when it does not exist yet.
    ///
    /// Returns `true` when the file was created.
    pub async fn ensure_exists(&self) -> Result<bool> {
        match fs::try_exists(&self.path).await {
            Ok(true) => Ok(false),
            Ok(false) => {
                atomic_write(&self.path, b"[]").await?;
                info!(
                    collection = %self.name,
                    path = %self.path.display(),
                    "seeded empty collection"
                );
                Ok(true)
            }
            Err(err) => Err(CatalogError::io(&self.path, err)),
        }
    }
}

#[async_trait]
impl<T> RecordStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Vec<T>> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|err| CatalogError::io(&self.path, err))?;
        let records: Vec<T> =
            serde_json::from_slice(&bytes).map_err(|err| CatalogError::parse(&self.path, err))?;
        debug!(collection = %self.name, count = records.len(), "loaded collection");
        Ok(records)
    }

    async fn save(&self, records: &[T]) -> Result<()> {
        let bytes =
            serde_json::to_vec_pretty(records).map_err(|err| CatalogError::parse(&self.path, err))?;
        atomic_write(&self.path, &bytes).await?;
        debug!(collection = %self.name, count = records.len(), "saved collection");
        Ok(())
    }
}

async fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|err| CatalogError::io(parent, err))?;
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)
        .await
        .map_err(|err| CatalogError::io(&tmp, err))?;

    fs::rename(&tmp, path)
        .await
        .map_err(|err| CatalogError::io(path, err))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;
    use tempfile::TempDir;

    #[tokio::test]
    async fn save_writes_two_space_pretty_json() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::<Category>::new(dir.path().join("categorie.json"));

        store
            .save(&[Category {
                id: 1,
                name: "Storia".to_string(),
            }])
            .await
            .unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "[\n  {\n    \"id\": 1,\n    \"name\": \"Storia\"\n  }\n]");
        assert!(!dir.path().join("categorie.tmp").exists());
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error_until_seeded() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::<Category>::new(dir.path().join("categorie.json"));

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));

        assert!(store.ensure_exists().await.unwrap());
        assert!(!store.ensure_exists().await.unwrap());
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("categorie.json");
        std::fs::write(&path, "[{\"id\": 1,").unwrap();

        let err = JsonFileStore::<Category>::new(&path).load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn name_is_the_file_name() {
        let store = JsonFileStore::<Category>::new("data/categorie-tour.json");
        assert_eq!(RecordStore::name(&store), "categorie-tour.json");
    }
}
