// src/services/reviews.rs
use crate::error::{StoreError, StoreResult};
use crate::models::review::{Review, ReviewBoardResponse, ReviewDraft};
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Reviews for one product, newest first.
#[derive(Debug, Clone, Default)]
pub struct ReviewBoard {
    reviews: Vec<Review>,
}

impl ReviewBoard {
    pub fn submit(&mut self, draft: ReviewDraft) -> StoreResult<&Review> {
        let author = draft.author.trim();
        let body = draft.body.trim();
        if author.is_empty() {
            return Err(StoreError::InvalidInput("author is required".to_string()));
        }
        if body.is_empty() {
            return Err(StoreError::InvalidInput("review text is required".to_string()));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&draft.rating) {
            return Err(StoreError::InvalidInput(format!(
                "rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let review = Review {
            id: Uuid::new_v4(),
            author: author.to_string(),
            rating: draft.rating,
            title: draft
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            body: body.to_string(),
            created_at: Utc::now(),
        };
        self.reviews.insert(0, review);
        Ok(&self.reviews[0])
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Arithmetic mean of every rating, `None` before the first review.
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        Some(f64::from(sum) / self.reviews.len() as f64)
    }

    pub fn to_response(&self, product_id: u32) -> ReviewBoardResponse {
        ReviewBoardResponse {
            product_id,
            count: self.reviews.len(),
            average_rating: self.average_rating(),
            reviews: self.reviews.clone(),
        }
    }
}

#[derive(Default)]
pub struct ReviewStore {
    boards: RwLock<HashMap<u32, ReviewBoard>>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callers are responsible for checking the product exists.
    pub async fn board(&self, product_id: u32) -> ReviewBoardResponse {
        self.boards
            .read()
            .await
            .get(&product_id)
            .map(|b| b.to_response(product_id))
            .unwrap_or_else(|| ReviewBoard::default().to_response(product_id))
    }

    pub async fn submit(&self, product_id: u32, draft: ReviewDraft) -> StoreResult<ReviewBoardResponse> {
        let mut boards = self.boards.write().await;
        let board = boards.entry(product_id).or_default();
        let review = board.submit(draft)?;
        tracing::info!(product_id, rating = review.rating, "review submitted");
        Ok(board.to_response(product_id))
    }
}
