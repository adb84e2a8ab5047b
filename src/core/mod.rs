pub mod error;
pub mod input;
pub mod province;
pub mod slug;
pub mod time;
pub mod types;

pub use error::{CatalogError, Result};
pub use input::{
    CategoryInput, MunicipalityDraft, MunicipalityInput, PoiDraft, PoiInput, TourDraft, TourInput,
};
pub use province::{Province, ProvinceInfo};
pub use types::{
    Category, Municipality, Named, PoiRef, PointOfInterest, Record, RecordId, Tour, TourCategory,
    TourRef, UNASSIGNED_MUNICIPALITY,
};
