//! File-backed collections: seeding, on-disk format and cascades across files

use std::fs;

use serde_json::Value;
use tempfile::TempDir;
use tourism_backoffice::storage::catalog::{
    CATEGORIES_FILE, MUNICIPALITIES_FILE, POINTS_OF_INTEREST_FILE, TOUR_CATEGORIES_FILE,
    TOURS_FILE,
};
use tourism_backoffice::{
    Backoffice, CatalogError, CategoryInput, Collections, MunicipalityInput, PoiInput, TourInput,
};

async fn open(dir: &TempDir) -> Backoffice {
    Backoffice::new(Collections::open(dir.path()).await.unwrap())
}

fn read_json(dir: &TempDir, file: &str) -> Value {
    let raw = fs::read_to_string(dir.path().join(file)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn missing_files_are_seeded_as_empty_arrays() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CATEGORIES_FILE), r#"[{"id": 4, "name": "Mare"}]"#).unwrap();

    let bo = open(&dir).await;

    for file in [TOUR_CATEGORIES_FILE, MUNICIPALITIES_FILE, POINTS_OF_INTEREST_FILE, TOURS_FILE] {
        assert_eq!(fs::read_to_string(dir.path().join(file)).unwrap(), "[]");
    }
    let categories = bo.list_categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Mare");
}

#[tokio::test]
async fn collections_are_written_pretty_printed() {
    let dir = TempDir::new().unwrap();
    let bo = open(&dir).await;

    bo.create_category(CategoryInput::new("Storia")).await.unwrap();

    let raw = fs::read_to_string(dir.path().join(CATEGORIES_FILE)).unwrap();
    assert_eq!(raw, "[\n  {\n    \"id\": 1,\n    \"name\": \"Storia\"\n  }\n]");
    assert!(!dir.path().join("categorie.tmp").exists());
}

#[tokio::test]
async fn points_of_interest_use_camel_case_fields_on_disk() {
    let dir = TempDir::new().unwrap();
    let bo = open(&dir).await;

    bo.create_category(CategoryInput::new("Storia")).await.unwrap();
    bo.create_municipality(MunicipalityInput::new("Noto", "SR"))
        .await
        .unwrap();
    bo.create_point_of_interest(PoiInput::new("Cattedrale", "Noto", &[1], &[]))
        .await
        .unwrap();

    let pois = read_json(&dir, POINTS_OF_INTEREST_FILE);
    let poi = &pois[0];
    assert_eq!(poi["slug"], "SR-noto-cattedrale");
    assert_eq!(poi["provincia"], "SR");
    assert!(poi["dataCreazione"].is_string());
    assert!(poi["ultimaModifica"].is_string());
    assert_eq!(poi["categorie"][0]["name"], "Storia");
}

#[tokio::test]
async fn reopening_reloads_the_same_records() {
    let dir = TempDir::new().unwrap();
    let first = open(&dir).await;
    first
        .create_tour_category(CategoryInput::new("Enogastronomia"))
        .await
        .unwrap();
    let created = first
        .create_tour(TourInput::new("Strada del vino", &[1]))
        .await
        .unwrap();
    drop(first);

    let second = open(&dir).await;
    assert_eq!(second.get_tour(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn malformed_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(TOURS_FILE), "{ not json").unwrap();
    let bo = open(&dir).await;

    let err = bo.list_tours().await.unwrap_err();

    match err {
        CatalogError::Parse { path, .. } => assert!(path.ends_with(TOURS_FILE)),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn municipality_delete_rewrites_the_points_of_interest_file() {
    let dir = TempDir::new().unwrap();
    let bo = open(&dir).await;

    bo.create_category(CategoryInput::new("Natura")).await.unwrap();
    bo.create_municipality(MunicipalityInput::new("Enna", "EN"))
        .await
        .unwrap();
    bo.create_point_of_interest(PoiInput::new("Lago di Pergusa", "Enna", &[1], &[]))
        .await
        .unwrap();

    bo.delete_municipality(1).await.unwrap();

    let pois = read_json(&dir, POINTS_OF_INTEREST_FILE);
    assert_eq!(pois[0]["comune"], "Da assegnare");
    assert_eq!(pois[0]["provincia"], "");
    assert_eq!(read_json(&dir, MUNICIPALITIES_FILE), Value::Array(Vec::new()));
}
