//! Back-office for tourism content kept in flat JSON files.
//!
//! Categories, tour categories, municipalities, points of interest and tours
//! live in one collection each. Records copy parts of the records they
//! reference (names, slugs) and the [`cascade`] module rewrites those copies
//! whenever the referenced record changes.
//!
//! ```no_run
//! use tourism_backoffice::{Backoffice, CategoryInput, Collections};
//!
//! # async fn demo() -> tourism_backoffice::Result<()> {
//! let backoffice = Backoffice::new(Collections::open("./data").await?);
//! let category = backoffice.create_category(CategoryInput::new("Storia")).await?;
//! backoffice
//!     .rename_category(category.id, CategoryInput::new("Cultura"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod cascade;
pub mod config;
pub mod core;
pub mod facade;
pub mod resolver;
pub mod storage;
pub mod web;

pub use core::{
    CatalogError, Category, CategoryInput, Municipality, MunicipalityInput, PoiInput, PoiRef,
    PointOfInterest, Province, ProvinceInfo, RecordId, Result, Tour, TourCategory, TourInput,
    TourRef,
};
pub use facade::Backoffice;
pub use storage::{Collections, InMemoryStore, JsonFileStore, RecordStore};
