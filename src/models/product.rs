// src/models/product.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level department a product is merchandised under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Apparel,
    Accessories,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Apparel => "Apparel",
            Category::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub title: String,
    pub category: Category,
    /// Serialized as a decimal string, e.g. "148".
    pub price: Decimal,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_low_stock: bool,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
