// src/handlers/cart.rs
use crate::catalog::find_product;
use crate::error::{StoreError, StoreResult};
use crate::middleware::rate_limit::cart_rate_limit_middleware;
use crate::models::cart::{AddToCartRequest, AdjustQuantityRequest, CartResponse};
use crate::taxonomy::Size;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use uuid::Uuid;

pub fn cart_routes() -> Router {
    Router::new()
        .route(
            "/api/carts",
            post(create_cart).layer(axum::middleware::from_fn(cart_rate_limit_middleware)),
        )
        .route("/api/carts/:cart_id", get(get_cart))
        .route("/api/carts/:cart_id/items", post(add_item))
        .route(
            "/api/carts/:cart_id/items/:line_id",
            patch(adjust_item).delete(remove_item),
        )
}

/// POST /api/carts - start an empty bag
async fn create_cart(
    Extension(state): Extension<Arc<AppState>>,
) -> (StatusCode, Json<CartResponse>) {
    (StatusCode::CREATED, Json(state.carts.create().await))
}

async fn get_cart(
    Path(cart_id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> StoreResult<Json<CartResponse>> {
    Ok(Json(state.carts.get(cart_id).await?))
}

/// POST /api/carts/:cart_id/items - add a product variant
async fn add_item(
    Path(cart_id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<AddToCartRequest>, JsonRejection>,
) -> StoreResult<Json<CartResponse>> {
    let Json(request) = payload?;
    let product = find_product(request.product_id)
        .ok_or_else(|| StoreError::NotFound(format!("Product {}", request.product_id)))?;
    let size = request.size.unwrap_or_else(|| Size::default_for(product.category));
    let color = request.color.or_else(|| product.color.clone());
    let qty = request.qty.unwrap_or(1);

    let cart = state
        .carts
        .update(cart_id, |cart| cart.add(product, size, color, qty).map(|_| ()))
        .await?;

    tracing::info!(cart_id = %cart_id, product_id = product.id, qty, "added to cart");
    Ok(Json(cart))
}

/// PATCH /api/carts/:cart_id/items/:line_id - +/- quantity, kept within 1..=99
async fn adjust_item(
    Path((cart_id, line_id)): Path<(Uuid, Uuid)>,
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<AdjustQuantityRequest>, JsonRejection>,
) -> StoreResult<Json<CartResponse>> {
    let Json(request) = payload?;
    let cart = state
        .carts
        .update(cart_id, |cart| cart.adjust(line_id, request.delta).map(|_| ()))
        .await?;
    Ok(Json(cart))
}

async fn remove_item(
    Path((cart_id, line_id)): Path<(Uuid, Uuid)>,
    Extension(state): Extension<Arc<AppState>>,
) -> StoreResult<Json<CartResponse>> {
    let cart = state
        .carts
        .update(cart_id, |cart| cart.remove(line_id).map(|_| ()))
        .await?;
    tracing::info!(cart_id = %cart_id, line_id = %line_id, "removed cart line");
    Ok(Json(cart))
}
