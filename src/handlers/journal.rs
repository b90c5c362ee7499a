// src/handlers/journal.rs
use crate::error::{StoreError, StoreResult};
use crate::journal::{articles, find_article, is_valid_email};
use crate::models::journal::{Article, NewsletterSignup};
use axum::{
    extract::{rejection::JsonRejection, Path},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

pub fn journal_routes() -> Router {
    Router::new()
        .route("/api/journal", get(list_articles))
        .route("/api/journal/:slug", get(get_article))
        .route("/api/newsletter", post(newsletter_signup))
}

async fn list_articles() -> Json<&'static [Article]> {
    Json(articles())
}

async fn get_article(Path(slug): Path<String>) -> StoreResult<Json<&'static Article>> {
    find_article(&slug)
        .map(Json)
        .ok_or_else(|| StoreError::NotFound("Story".to_string()))
}

/// POST /api/newsletter - acknowledge only, nothing is stored
async fn newsletter_signup(
    payload: Result<Json<NewsletterSignup>, JsonRejection>,
) -> StoreResult<Json<Value>> {
    let Json(signup) = payload?;
    let email = signup.email.trim();
    if email.is_empty() {
        return Err(StoreError::InvalidInput("email is required".to_string()));
    }
    if !is_valid_email(email) {
        return Err(StoreError::InvalidInput(format!("'{}' is not a valid email", email)));
    }

    tracing::info!("newsletter signup received");
    Ok(Json(json!({
        "subscribed": true,
        "message": "Welcome to the circle. Our next letter is on its way."
    })))
}
