use serde::{Deserialize, Serialize};

pub type RecordId = u64;

/// Value stored in place of a municipality name once the municipality is deleted.
pub const UNASSIGNED_MUNICIPALITY: &str = "Da assegnare";

/// Anything persisted in a collection with an integer identity.
pub trait Record {
    fn id(&self) -> RecordId;
}

/// Records whose display name is copied into other collections.
pub trait Named: Record {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
}

// ============================================================================
// Owning records
// ============================================================================

/// Point-of-interest category. Embedded verbatim in `PointOfInterest::categorie`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
}

/// Tour category. Same shape as [`Category`] but lives in its own collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourCategory {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipality {
    pub id: RecordId,
    pub nome: String,
    pub slug: String,
    pub provincia: String,
}

/// A point of interest.
///
/// `categorie` and `tours` are snapshots of the referenced records, not foreign
/// keys; `comune`/`provincia` copy the municipality by name. The cascade keeps
/// them in step with their owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub id: RecordId,
    pub nome: String,
    pub slug: String,
    pub comune: String,
    #[serde(default)]
    pub provincia: String,
    #[serde(default)]
    pub categorie: Vec<Category>,
    #[serde(default)]
    pub tours: Vec<TourRef>,
    #[serde(default)]
    pub data_creazione: String,
    #[serde(default)]
    pub ultima_modifica: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: RecordId,
    pub nome: String,
    pub slug: String,
    #[serde(default)]
    pub categorie: Vec<TourCategory>,
    #[serde(default)]
    pub pdi: Vec<PoiRef>,
    #[serde(default)]
    pub data_creazione: String,
    #[serde(default)]
    pub ultima_modifica: String,
}

// ============================================================================
// Embedded snapshots
// ============================================================================

/// Tour as seen from a point of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourRef {
    pub id: RecordId,
    pub nome: String,
}

/// Point of interest as seen from a tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiRef {
    pub id: RecordId,
    pub nome: String,
    pub comune: String,
}

impl From<&Tour> for TourRef {
    fn from(tour: &Tour) -> Self {
        Self {
            id: tour.id,
            nome: tour.nome.clone(),
        }
    }
}

impl From<&PointOfInterest> for PoiRef {
    fn from(poi: &PointOfInterest) -> Self {
        Self {
            id: poi.id,
            nome: poi.nome.clone(),
            comune: poi.comune.clone(),
        }
    }
}

impl PointOfInterest {
    pub fn has_tour(&self, tour_id: RecordId) -> bool {
        self.tours.iter().any(|tour| tour.id == tour_id)
    }
}

// ============================================================================
// Trait plumbing
// ============================================================================

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> RecordId {
                    self.id
                }
            }
        )*
    };
}

impl_record!(
    Category,
    TourCategory,
    Municipality,
    PointOfInterest,
    Tour,
    TourRef,
    PoiRef
);

impl Named for Category {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Named for TourCategory {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Named for TourRef {
    fn name(&self) -> &str {
        &self.nome
    }

    fn set_name(&mut self, name: String) {
        self.nome = name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn point_of_interest_uses_camel_case_timestamps() {
        let poi = PointOfInterest {
            id: 1,
            nome: "Villa Romana".to_string(),
            slug: "EN-piazza-armerina-villa-romana".to_string(),
            comune: "Piazza Armerina".to_string(),
            provincia: "EN".to_string(),
            categorie: vec![Category {
                id: 5,
                name: "Storia".to_string(),
            }],
            tours: vec![],
            data_creazione: "1-2-2024 10:00:00".to_string(),
            ultima_modifica: "1-2-2024 10:00:00".to_string(),
        };

        let value = serde_json::to_value(&poi).unwrap();
        assert_eq!(value["dataCreazione"], "1-2-2024 10:00:00");
        assert_eq!(value["ultimaModifica"], "1-2-2024 10:00:00");
        assert_eq!(value["categorie"][0]["name"], "Storia");
    }

    #[test]
    fn tour_without_pdi_field_deserializes_empty() {
        let tour: Tour = serde_json::from_value(json!({
            "id": 3,
            "nome": "Barocco",
            "slug": "barocco",
            "categorie": [{ "id": 1, "name": "Arte" }]
        }))
        .unwrap();

        assert!(tour.pdi.is_empty());
        assert_eq!(tour.categorie[0].id, 1);
    }
}
