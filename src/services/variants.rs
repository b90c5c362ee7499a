// src/services/variants.rs
//! Product page extras: related pieces, size options and the color swatches whose
//! selection is previewed by tinting the single product photo with a CSS filter.

use crate::catalog::catalog;
use crate::models::product::Product;
use crate::taxonomy::Size;
use serde::Serialize;

const RELATED_LIMIT: usize = 4;
const SWATCH_LIMIT: usize = 4;
const CORE_COLORS: [&str; 4] = ["Terracotta", "Sage Green", "Sand", "Charon Charcoal"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Swatch {
    pub name: &'static str,
    pub hex: &'static str,
}

const PALETTE: [Swatch; 7] = [
    Swatch { name: "Terracotta", hex: "#8c3a28" },
    Swatch { name: "Sage Green", hex: "#5d6b58" },
    Swatch { name: "Sand", hex: "#e3d8c8" },
    Swatch { name: "Charon Charcoal", hex: "#2f2f2f" },
    Swatch { name: "Rust Clay", hex: "#b87a6d" },
    Swatch { name: "Ivory", hex: "#f2efde" },
    Swatch { name: "Natural", hex: "#dcc9b6" },
];

#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    pub sizes: &'static [Size],
    pub default_size: Size,
    pub swatches: Vec<Swatch>,
    pub related: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageFilter {
    pub color: String,
    /// CSS `filter` value; `None` shows the photo untouched.
    pub filter: Option<&'static str>,
}

pub fn product_detail(product: &Product) -> ProductDetail {
    let related = catalog()
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(RELATED_LIMIT)
        .cloned()
        .collect();

    ProductDetail {
        product: product.clone(),
        sizes: Size::available_for(product.category),
        default_size: Size::default_for(product.category),
        swatches: swatches_for(product),
        related,
    }
}

pub fn swatches_for(product: &Product) -> Vec<Swatch> {
    PALETTE
        .iter()
        .filter(|s| product.color.as_deref() == Some(s.name) || CORE_COLORS.contains(&s.name))
        .take(SWATCH_LIMIT)
        .copied()
        .collect()
}

pub fn image_filter(product: &Product, selected: &str) -> ImageFilter {
    let filter = if product.color.as_deref() == Some(selected) {
        None
    } else {
        Some(match selected {
            "Sage Green" => "sepia(0.3) hue-rotate(60deg) saturate(0.8)",
            "Charon Charcoal" => "grayscale(1) brightness(0.6)",
            "Terracotta" => "sepia(0.4) saturate(1.6) hue-rotate(-25deg)",
            "Sand" => "brightness(1.1) sepia(0.2) saturate(0.5)",
            "Rust Clay" => "sepia(0.5) saturate(1.8) hue-rotate(-35deg)",
            "Ivory" => "brightness(1.2) saturate(0)",
            "Natural" => "sepia(0.3) saturate(0.6)",
            _ => "none",
        })
    };

    ImageFilter { color: selected.to_string(), filter }
}
