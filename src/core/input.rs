//! Request payloads and their presence checks.
//!
//! Every field is optional on the wire so that a missing value surfaces as a
//! [`CatalogError::Validation`] instead of a deserialization failure. Validation
//! never touches storage.

use serde::Deserialize;

use super::error::{CatalogError, Result};
use super::types::RecordId;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryInput {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MunicipalityInput {
    pub nome: Option<String>,
    pub provincia: Option<String>,
}

/// Point-of-interest payload. `categorie` and `tours` are ids; nulls are allowed
/// and dropped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoiInput {
    pub nome: Option<String>,
    pub comune: Option<String>,
    pub categorie: Option<Vec<Option<RecordId>>>,
    pub tours: Option<Vec<Option<RecordId>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TourInput {
    pub nome: Option<String>,
    pub categorie: Option<Vec<Option<RecordId>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityDraft {
    pub nome: String,
    pub provincia: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoiDraft {
    pub nome: String,
    pub comune: String,
    pub categorie: Vec<RecordId>,
    pub tours: Vec<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourDraft {
    pub nome: String,
    pub categorie: Vec<RecordId>,
}

fn required(value: Option<String>, message: &str) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(CatalogError::validation(message)),
    }
}

fn present_ids(ids: Option<Vec<Option<RecordId>>>) -> Vec<RecordId> {
    ids.unwrap_or_default().into_iter().flatten().collect()
}

impl CategoryInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn validate(self) -> Result<String> {
        required(self.name, "category name is required")
    }
}

impl MunicipalityInput {
    pub fn new(nome: impl Into<String>, provincia: impl Into<String>) -> Self {
        Self {
            nome: Some(nome.into()),
            provincia: Some(provincia.into()),
        }
    }

    pub fn validate(self) -> Result<MunicipalityDraft> {
        let message = "municipality name and province are required";
        Ok(MunicipalityDraft {
            nome: required(self.nome, message)?,
            provincia: required(self.provincia, message)?,
        })
    }
}

impl PoiInput {
    pub fn new(
        nome: impl Into<String>,
        comune: impl Into<String>,
        categorie: &[RecordId],
        tours: &[RecordId],
    ) -> Self {
        Self {
            nome: Some(nome.into()),
            comune: Some(comune.into()),
            categorie: Some(categorie.iter().copied().map(Some).collect()),
            tours: Some(tours.iter().copied().map(Some).collect()),
        }
    }

    pub fn validate(self) -> Result<PoiDraft> {
        let nome = required(self.nome, "point of interest name is required")?;
        let comune = required(self.comune, "point of interest municipality is required")?;
        let categorie = present_ids(self.categorie);
        if categorie.is_empty() {
            return Err(CatalogError::validation(
                "a point of interest needs at least one category",
            ));
        }

        Ok(PoiDraft {
            nome,
            comune,
            categorie,
            tours: present_ids(self.tours),
        })
    }
}

impl TourInput {
    pub fn new(nome: impl Into<String>, categorie: &[RecordId]) -> Self {
        Self {
            nome: Some(nome.into()),
            categorie: Some(categorie.iter().copied().map(Some).collect()),
        }
    }

    pub fn validate(self) -> Result<TourDraft> {
        let nome = required(self.nome, "tour name is required")?;
        let categorie = present_ids(self.categorie);
        if categorie.is_empty() {
            return Err(CatalogError::validation("a tour needs at least one category"));
        }
        Ok(TourDraft { nome, categorie })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_names_are_rejected() {
        let err = CategoryInput::new("   ").validate().unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(CategoryInput::default().validate().is_err());
    }

    #[test]
    fn municipality_requires_both_fields() {
        let input: MunicipalityInput = serde_json::from_value(json!({ "nome": "Enna" })).unwrap();
        assert!(input.validate().is_err());

        let draft = MunicipalityInput::new(" Enna ", "EN").validate().unwrap();
        assert_eq!(draft.nome, "Enna");
        assert_eq!(draft.provincia, "EN");
    }

    #[test]
    fn poi_with_empty_categories_is_invalid() {
        let err = PoiInput::new("Duomo", "Enna", &[], &[]).validate().unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn poi_drops_null_ids_and_defaults_tours() {
        let input: PoiInput = serde_json::from_value(json!({
            "nome": "Duomo",
            "comune": "Enna",
            "categorie": [null, 5, null],
        }))
        .unwrap();

        let draft = input.validate().unwrap();
        assert_eq!(draft.categorie, vec![5]);
        assert!(draft.tours.is_empty());
    }

    #[test]
    fn poi_with_only_null_categories_is_invalid() {
        let input: PoiInput = serde_json::from_value(json!({
            "nome": "Duomo",
            "comune": "Enna",
            "categorie": [null],
        }))
        .unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn tour_requires_categories() {
        assert!(TourInput::new("Barocco", &[]).validate().is_err());
        let draft = TourInput::new("Barocco", &[2, 3]).validate().unwrap();
        assert_eq!(draft.categorie, vec![2, 3]);
    }
}
