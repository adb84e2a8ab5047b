//! HTTP surface: an axum router over [`Backoffice`], mounted under `/api`.

mod error;
mod extract;
mod handlers;

use axum::Router;
use axum::http::Method;
use axum::routing::{get, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::facade::Backoffice;

pub use error::{ErrorResponse, Result, WebError};
pub use extract::{IdParam, JsonBody};
pub use handlers::BulkUpdate;

#[derive(Clone)]
pub struct AppState {
    pub backoffice: Backoffice,
}

impl AppState {
    pub fn new(backoffice: Backoffice) -> Self {
        Self { backoffice }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    use handlers::*;

    Router::new()
        .route("/categorie", get(list_categories).post(create_category))
        .route(
            "/categorie/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route(
            "/categorie-tour",
            get(list_tour_categories).post(create_tour_category),
        )
        .route(
            "/categorie-tour/:id",
            get(get_tour_category)
                .put(update_tour_category)
                .delete(delete_tour_category),
        )
        .route(
            "/comuni",
            get(list_municipalities).post(create_municipality),
        )
        .route("/comuni/province", get(province_codes))
        .route("/comuni/slug/:slug", get(get_municipality_by_slug))
        .route(
            "/comuni/:id",
            get(get_municipality)
                .put(update_municipality)
                .delete(delete_municipality),
        )
        .route("/province", get(list_provinces))
        .route("/province/slug/:slug", get(get_province))
        .route("/province/comuni/:slug", get(municipalities_of_province))
        .route(
            "/pdi",
            get(list_points_of_interest).post(create_point_of_interest),
        )
        .route("/pdi/slug/:slug", get(get_point_of_interest_by_slug))
        .route(
            "/pdi/remove-tour/:tourId",
            put(remove_tour_from_points_of_interest),
        )
        .route(
            "/pdi/:id",
            get(get_point_of_interest)
                .put(update_point_of_interest)
                .delete(delete_point_of_interest),
        )
        .route("/tours", get(list_tours).post(create_tour))
        .route("/tours/slug/:slug", get(get_tour_by_slug))
        .route(
            "/tours/update-category/:id",
            put(sync_tour_category_in_tours),
        )
        .route(
            "/tours/remove-category/:id",
            put(remove_tour_category_from_tours),
        )
        .route(
            "/tours/:id",
            get(get_tour).put(update_tour).delete(delete_tour),
        )
}
