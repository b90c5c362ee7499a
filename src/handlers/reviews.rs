// src/handlers/reviews.rs
use crate::catalog::find_product;
use crate::error::{StoreError, StoreResult};
use crate::models::review::{ReviewBoardResponse, ReviewDraft};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;

pub fn review_routes() -> Router {
    Router::new().route(
        "/api/products/:id/reviews",
        get(list_reviews).post(submit_review),
    )
}

fn ensure_product(id: u32) -> StoreResult<()> {
    find_product(id)
        .map(|_| ())
        .ok_or_else(|| StoreError::NotFound(format!("Product {}", id)))
}

async fn list_reviews(
    Path(id): Path<u32>,
    Extension(state): Extension<Arc<AppState>>,
) -> StoreResult<Json<ReviewBoardResponse>> {
    ensure_product(id)?;
    Ok(Json(state.reviews.board(id).await))
}

/// POST /api/products/:id/reviews - newest review goes to the top
async fn submit_review(
    Path(id): Path<u32>,
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<ReviewDraft>, JsonRejection>,
) -> StoreResult<(StatusCode, Json<ReviewBoardResponse>)> {
    ensure_product(id)?;
    let Json(draft) = payload?;
    let board = state.reviews.submit(id, draft).await?;
    Ok((StatusCode::CREATED, Json(board)))
}
