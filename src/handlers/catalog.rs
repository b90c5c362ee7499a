// src/handlers/catalog.rs
use crate::catalog::{catalog, find_product};
use crate::error::{StoreError, StoreResult};
use crate::models::product::Product;
use crate::services::listing::{build_listing, Listing, ListingQuery, Shelf};
use crate::services::search::search;
use crate::services::variants::{image_filter, product_detail, ImageFilter};
use axum::{
    extract::{Path, Query},
    response::{IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

/// Where shoppers land when they follow a link to a product that doesn't exist.
pub const DEFAULT_LISTING: &str = "/api/listings/new-arrivals";

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<Product>,
}

#[derive(Deserialize)]
pub struct ImageFilterParams {
    pub color: String,
}

pub fn catalog_routes() -> Router {
    Router::new()
        .route("/api/catalog", get(list_catalog))
        .route("/api/listings/:shelf", get(get_listing))
        .route("/api/products/:id", get(get_product))
        .route("/api/products/:id/image-filter", get(get_image_filter))
        .route("/api/search", get(search_products))
}

async fn list_catalog() -> Json<&'static [Product]> {
    Json(catalog())
}

/// GET /api/listings/:shelf - filtered, sorted, windowed shelf
async fn get_listing(Path(shelf): Path<Shelf>, Query(query): Query<ListingQuery>) -> Json<Listing> {
    Json(build_listing(shelf, &query))
}

/// GET /api/products/:id - product page data, or a redirect for unknown ids
async fn get_product(Path(id): Path<u32>) -> Response {
    match find_product(id) {
        Some(product) => Json(product_detail(product)).into_response(),
        None => {
            tracing::info!(product_id = id, "unknown product, redirecting to {}", DEFAULT_LISTING);
            Redirect::to(DEFAULT_LISTING).into_response()
        }
    }
}

async fn get_image_filter(
    Path(id): Path<u32>,
    Query(params): Query<ImageFilterParams>,
) -> StoreResult<Json<ImageFilter>> {
    let product =
        find_product(id).ok_or_else(|| StoreError::NotFound(format!("Product {}", id)))?;
    Ok(Json(image_filter(product, &params.color)))
}

/// GET /api/search?q= - search overlay results
async fn search_products(Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let results: Vec<Product> = search(&params.q).into_iter().cloned().collect();
    Json(SearchResponse {
        query: params.q,
        count: results.len(),
        results,
    })
}
