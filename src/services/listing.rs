// src/services/listing.rs
//! Shelf listings: filter, sort and "load more" windowing over the catalog.

use crate::catalog::{catalog, find_product, products_in};
use crate::models::product::{Category, Product};
use crate::taxonomy::{ColorFamily, Size, Subcategory};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How many more products each "load more" reveals.
pub const LOAD_MORE_STEP: usize = 3;

/// Hand-picked pieces for the new arrivals shelf, in merchandising order.
const NEW_ARRIVAL_PICKS: [u32; 8] = [1, 14, 15, 16, 17, 2, 8, 4];
/// Shown above the new arrivals grid.
const NEW_ARRIVAL_HIGHLIGHTS: [u32; 2] = [1, 14];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shelf {
    Apparel,
    Accessories,
    NewArrivals,
}

impl Shelf {
    pub fn products(&self) -> Vec<&'static Product> {
        match self {
            Shelf::Apparel => products_in(Category::Apparel).collect(),
            Shelf::Accessories => products_in(Category::Accessories).collect(),
            Shelf::NewArrivals => catalog()
                .iter()
                .filter(|p| NEW_ARRIVAL_PICKS.contains(&p.id) || p.is_new)
                .collect(),
        }
    }

    pub fn subcategories(&self) -> &'static [Subcategory] {
        match self {
            Shelf::Apparel => &Subcategory::APPAREL,
            Shelf::Accessories => &Subcategory::ACCESSORIES,
            Shelf::NewArrivals => &[
                Subcategory::Dresses,
                Subcategory::Tops,
                Subcategory::Bottoms,
                Subcategory::Outerwear,
                Subcategory::Jewelry,
                Subcategory::BagsAndTotes,
                Subcategory::Scarves,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    Featured,
    PriceLowHigh,
    PriceHighLow,
}

impl SortOption {
    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Featured => b.is_new.cmp(&a.is_new).then(a.id.cmp(&b.id)),
            SortOption::PriceLowHigh => a.price.cmp(&b.price),
            SortOption::PriceHighLow => b.price.cmp(&a.price),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<Subcategory>,
    pub color: Option<ColorFamily>,
    /// Accepted for parity with the size picker; every piece is stocked in all
    /// sizes of its department so it never narrows the result.
    pub size: Option<Size>,
    #[serde(default)]
    pub sort: SortOption,
    pub visible: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubcategoryCount {
    pub subcategory: Subcategory,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub shelf: Shelf,
    pub sort: SortOption,
    pub products: Vec<Product>,
    pub total: usize,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_visible: Option<usize>,
    pub all_count: usize,
    pub counts: Vec<SubcategoryCount>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<Product>,
}

pub fn build_listing(shelf: Shelf, query: &ListingQuery) -> Listing {
    let pool = shelf.products();

    let counts = shelf
        .subcategories()
        .iter()
        .map(|sub| SubcategoryCount {
            subcategory: *sub,
            label: sub.label(),
            count: pool.iter().filter(|p| sub.matches(p)).count(),
        })
        .collect();

    // The curated new arrivals view leads with the highlights, so they leave the grid.
    let curated = shelf == Shelf::NewArrivals
        && query.category.is_none()
        && query.color.is_none()
        && query.sort == SortOption::Featured;
    let highlights: Vec<Product> = if curated {
        NEW_ARRIVAL_HIGHLIGHTS
            .iter()
            .filter_map(|id| find_product(*id))
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    let mut matched: Vec<&Product> = pool
        .iter()
        .copied()
        .filter(|p| query.category.map_or(true, |sub| sub.matches(p)))
        .filter(|p| query.color.map_or(true, |family| family.matches(p)))
        .filter(|p| !highlights.iter().any(|h| h.id == p.id))
        .collect();

    // Stable, so equal prices keep catalog order.
    matched.sort_by(|a, b| query.sort.compare(a, b));

    let total = matched.len();
    let shown = query.visible.map_or(total, |v| v.min(total));
    let has_more = shown < total;

    tracing::debug!(
        shelf = ?shelf,
        category = ?query.category,
        color = ?query.color,
        sort = ?query.sort,
        total,
        shown,
        "built listing"
    );

    Listing {
        shelf,
        sort: query.sort,
        products: matched.into_iter().take(shown).cloned().collect(),
        total,
        has_more,
        next_visible: has_more.then(|| shown + LOAD_MORE_STEP),
        all_count: pool.len(),
        counts,
        highlights,
    }
}
