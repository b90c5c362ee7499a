// src/models/review.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub author: String,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Review form payload as submitted from the product page.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewDraft {
    pub author: String,
    pub rating: u8,
    pub title: Option<String>,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct ReviewBoardResponse {
    pub product_id: u32,
    pub count: usize,
    pub average_rating: Option<f64>,
    pub reviews: Vec<Review>,
}
