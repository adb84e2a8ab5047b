use super::Backoffice;
use crate::core::{CatalogError, Province, ProvinceInfo, Result};

const ENTITY: &str = "province";

impl Backoffice {
    pub fn list_provinces(&self) -> Vec<ProvinceInfo> {
        Province::ALL.into_iter().map(Province::info).collect()
    }

    pub fn province_codes(&self) -> Vec<&'static str> {
        Province::codes()
    }

    pub fn get_province(&self, slug: &str) -> Result<ProvinceInfo> {
        Province::from_slug(slug)
            .map(Province::info)
            .ok_or_else(|| CatalogError::not_found(ENTITY, slug))
    }
}
