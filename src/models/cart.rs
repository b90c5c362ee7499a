// src/models/cart.rs
use crate::taxonomy::Size;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub line_id: Uuid,
    pub product_id: u32,
    pub title: String,
    pub unit_price: Decimal,
    pub image: String,
    pub size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub qty: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.qty)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub estimated_tax: Decimal,
    pub total: Decimal,
    pub total_items: u64,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart_id: Uuid,
    pub lines: Vec<CartLine>,
    pub summary: CartSummary,
}

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: u32,
    pub size: Option<Size>,
    pub color: Option<String>,
    pub qty: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AdjustQuantityRequest {
    pub delta: i32,
}
