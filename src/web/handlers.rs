use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;

use super::AppState;
use super::error::Result;
use super::extract::{IdParam, JsonBody};
use crate::core::{
    Category, CategoryInput, Municipality, MunicipalityInput, PoiInput, PointOfInterest,
    ProvinceInfo, Tour, TourCategory, TourInput,
};

/// Reply of the bulk rewrite endpoints.
#[derive(Debug, Serialize)]
pub struct BulkUpdate {
    pub message: String,
    pub updated: usize,
}

// categorie

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.backoffice.list_categories().await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<Json<Category>> {
    Ok(Json(state.backoffice.get_category(id).await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<(StatusCode, Json<Category>)> {
    let category = state.backoffice.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    IdParam(id): IdParam,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<Json<Category>> {
    Ok(Json(state.backoffice.rename_category(id, input).await?))
}

pub async fn delete_category(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<StatusCode> {
    state.backoffice.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// categorie-tour

pub async fn list_tour_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<TourCategory>>> {
    Ok(Json(state.backoffice.list_tour_categories().await?))
}

pub async fn get_tour_category(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<Json<TourCategory>> {
    Ok(Json(state.backoffice.get_tour_category(id).await?))
}

pub async fn create_tour_category(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<(StatusCode, Json<TourCategory>)> {
    let category = state.backoffice.create_tour_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_tour_category(
    State(state): State<AppState>,
    IdParam(id): IdParam,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<Json<TourCategory>> {
    Ok(Json(state.backoffice.rename_tour_category(id, input).await?))
}

pub async fn delete_tour_category(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<StatusCode> {
    state.backoffice.delete_tour_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// comuni

pub async fn list_municipalities(
    State(state): State<AppState>,
) -> Result<Json<Vec<Municipality>>> {
    Ok(Json(state.backoffice.list_municipalities().await?))
}

pub async fn get_municipality(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<Json<Municipality>> {
    Ok(Json(state.backoffice.get_municipality(id).await?))
}

pub async fn get_municipality_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Municipality>> {
    Ok(Json(state.backoffice.get_municipality_by_slug(&slug).await?))
}

pub async fn create_municipality(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<MunicipalityInput>,
) -> Result<(StatusCode, Json<Municipality>)> {
    let municipality = state.backoffice.create_municipality(input).await?;
    Ok((StatusCode::CREATED, Json(municipality)))
}

pub async fn update_municipality(
    State(state): State<AppState>,
    IdParam(id): IdParam,
    JsonBody(input): JsonBody<MunicipalityInput>,
) -> Result<Json<Municipality>> {
    Ok(Json(state.backoffice.update_municipality(id, input).await?))
}

pub async fn delete_municipality(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<StatusCode> {
    state.backoffice.delete_municipality(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn province_codes(State(state): State<AppState>) -> Json<Vec<&'static str>> {
    Json(state.backoffice.province_codes())
}

// province

pub async fn list_provinces(State(state): State<AppState>) -> Json<Vec<ProvinceInfo>> {
    Json(state.backoffice.list_provinces())
}

pub async fn get_province(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProvinceInfo>> {
    Ok(Json(state.backoffice.get_province(&slug)?))
}

pub async fn municipalities_of_province(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<Municipality>>> {
    Ok(Json(state.backoffice.municipalities_of_province(&slug).await?))
}

// pdi

pub async fn list_points_of_interest(
    State(state): State<AppState>,
) -> Result<Json<Vec<PointOfInterest>>> {
    Ok(Json(state.backoffice.list_points_of_interest().await?))
}

pub async fn get_point_of_interest(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<Json<PointOfInterest>> {
    Ok(Json(state.backoffice.get_point_of_interest(id).await?))
}

pub async fn get_point_of_interest_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PointOfInterest>> {
    Ok(Json(
        state.backoffice.get_point_of_interest_by_slug(&slug).await?,
    ))
}

pub async fn create_point_of_interest(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<PoiInput>,
) -> Result<(StatusCode, Json<PointOfInterest>)> {
    let poi = state.backoffice.create_point_of_interest(input).await?;
    Ok((StatusCode::CREATED, Json(poi)))
}

pub async fn update_point_of_interest(
    State(state): State<AppState>,
    IdParam(id): IdParam,
    JsonBody(input): JsonBody<PoiInput>,
) -> Result<Json<PointOfInterest>> {
    Ok(Json(
        state.backoffice.update_point_of_interest(id, input).await?,
    ))
}

pub async fn delete_point_of_interest(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<StatusCode> {
    state.backoffice.delete_point_of_interest(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_tour_from_points_of_interest(
    State(state): State<AppState>,
    IdParam(tour_id): IdParam,
) -> Result<Json<BulkUpdate>> {
    let updated = state
        .backoffice
        .remove_tour_from_points_of_interest(tour_id)
        .await?;
    Ok(Json(BulkUpdate {
        message: format!("Tour {tour_id} removed from points of interest"),
        updated,
    }))
}

// tours

pub async fn list_tours(State(state): State<AppState>) -> Result<Json<Vec<Tour>>> {
    Ok(Json(state.backoffice.list_tours().await?))
}

pub async fn get_tour(State(state): State<AppState>, IdParam(id): IdParam) -> Result<Json<Tour>> {
    Ok(Json(state.backoffice.get_tour(id).await?))
}

pub async fn get_tour_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Tour>> {
    Ok(Json(state.backoffice.get_tour_by_slug(&slug).await?))
}

pub async fn create_tour(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<TourInput>,
) -> Result<(StatusCode, Json<Tour>)> {
    let tour = state.backoffice.create_tour(input).await?;
    Ok((StatusCode::CREATED, Json(tour)))
}

pub async fn update_tour(
    State(state): State<AppState>,
    IdParam(id): IdParam,
    JsonBody(input): JsonBody<TourInput>,
) -> Result<Json<Tour>> {
    Ok(Json(state.backoffice.update_tour(id, input).await?))
}

pub async fn delete_tour(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<StatusCode> {
    state.backoffice.delete_tour(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn sync_tour_category_in_tours(
    State(state): State<AppState>,
    IdParam(id): IdParam,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<Json<BulkUpdate>> {
    let updated = state.backoffice.sync_tour_category_in_tours(id, input).await?;
    Ok(Json(BulkUpdate {
        message: format!("Tour category {id} updated in tours"),
        updated,
    }))
}

pub async fn remove_tour_category_from_tours(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<Json<BulkUpdate>> {
    let updated = state.backoffice.remove_tour_category_from_tours(id).await?;
    Ok(Json(BulkUpdate {
        message: format!("Tour category {id} removed from tours"),
        updated,
    }))
}
