use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::engine::RecordStore;
use super::memory::InMemoryStore;
use super::persistence::JsonFileStore;
use crate::core::{Category, Municipality, PointOfInterest, Result, Tour, TourCategory};

pub const CATEGORIES_FILE: &str = "categorie.json";
pub const TOUR_CATEGORIES_FILE: &str = "categorie-tour.json";
pub const MUNICIPALITIES_FILE: &str = "comuni.json";
pub const POINTS_OF_INTEREST_FILE: &str = "pdi.json";
pub const TOURS_FILE: &str = "tours.json";

pub type StoreHandle<T> = Arc<dyn RecordStore<T>>;

/// Handles to every mutable collection.
///
/// The service layer only ever sees these handles, never paths.
#[derive(Clone)]
pub struct Collections {
    pub categories: StoreHandle<Category>,
    pub tour_categories: StoreHandle<TourCategory>,
    pub municipalities: StoreHandle<Municipality>,
    pub points_of_interest: StoreHandle<PointOfInterest>,
    pub tours: StoreHandle<Tour>,
}

impl Collections {
    /// JSON files under `data_dir`, seeding any missing file with `[]`.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = data_dir.as_ref();
        Ok(Self {
            categories: open_file(dir, CATEGORIES_FILE).await?,
            tour_categories: open_file(dir, TOUR_CATEGORIES_FILE).await?,
            municipalities: open_file(dir, MUNICIPALITIES_FILE).await?,
            points_of_interest: open_file(dir, POINTS_OF_INTEREST_FILE).await?,
            tours: open_file(dir, TOURS_FILE).await?,
        })
    }

    /// Empty in-memory collections.
    pub fn in_memory() -> Self {
        Self {
            categories: Arc::new(InMemoryStore::new(CATEGORIES_FILE)),
            tour_categories: Arc::new(InMemoryStore::new(TOUR_CATEGORIES_FILE)),
            municipalities: Arc::new(InMemoryStore::new(MUNICIPALITIES_FILE)),
            points_of_interest: Arc::new(InMemoryStore::new(POINTS_OF_INTEREST_FILE)),
            tours: Arc::new(InMemoryStore::new(TOURS_FILE)),
        }
    }
}

async fn open_file<T>(dir: &Path, file: &str) -> Result<StoreHandle<T>>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let store = JsonFileStore::<T>::new(dir.join(file));
    store.ensure_exists().await?;
    Ok(Arc::new(store))
}
