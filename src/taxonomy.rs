// src/taxonomy.rs
//! Shared product classification. Subcategories are inferred from titles, so
//! every listing must go through these rules to classify a product the same way.

use crate::models::product::{Category, Product};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subcategory {
    Dresses,
    Tops,
    Bottoms,
    Outerwear,
    Jewelry,
    BagsAndTotes,
    Scarves,
}

impl Subcategory {
    pub const APPAREL: [Subcategory; 4] = [
        Subcategory::Dresses,
        Subcategory::Tops,
        Subcategory::Bottoms,
        Subcategory::Outerwear,
    ];

    pub const ACCESSORIES: [Subcategory; 3] = [
        Subcategory::Jewelry,
        Subcategory::BagsAndTotes,
        Subcategory::Scarves,
    ];

    pub fn department(&self) -> Category {
        match self {
            Subcategory::Dresses
            | Subcategory::Tops
            | Subcategory::Bottoms
            | Subcategory::Outerwear => Category::Apparel,
            Subcategory::Jewelry | Subcategory::BagsAndTotes | Subcategory::Scarves => {
                Category::Accessories
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Subcategory::Dresses => "Dresses",
            Subcategory::Tops => "Tops",
            Subcategory::Bottoms => "Bottoms",
            Subcategory::Outerwear => "Outerwear",
            Subcategory::Jewelry => "Jewelry",
            Subcategory::BagsAndTotes => "Bags & Totes",
            Subcategory::Scarves => "Scarves",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Subcategory::Dresses => &["dress", "jumpsuit", "maxi"],
            Subcategory::Tops => &["blouse", "tunic", "shirt", "top"],
            Subcategory::Bottoms => &["pant", "skirt", "trouser"],
            Subcategory::Outerwear => &["coat", "jacket", "cardigan"],
            Subcategory::Jewelry => &["pendant", "earring", "cuff", "ring", "necklace"],
            Subcategory::BagsAndTotes => &["tote", "bag", "purse"],
            Subcategory::Scarves => &["scarf", "shawl"],
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        if product.category != self.department() {
            return false;
        }
        let title = product.title.to_lowercase();
        self.keywords().iter().any(|k| title.contains(k))
    }
}

/// Swatch groups offered as listing filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFamily {
    Orange,
    Sage,
    Neutrals,
    Dark,
}

impl ColorFamily {
    pub const ALL: [ColorFamily; 4] = [
        ColorFamily::Orange,
        ColorFamily::Sage,
        ColorFamily::Neutrals,
        ColorFamily::Dark,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            ColorFamily::Orange => "#E86C3F",
            ColorFamily::Sage => "#5d6b58",
            ColorFamily::Neutrals => "#e3d8c8",
            ColorFamily::Dark => "#1a1714",
        }
    }

    fn members(&self) -> &'static [&'static str] {
        match self {
            ColorFamily::Orange => &["Terracotta", "Rust Clay", "Orange"],
            ColorFamily::Sage => &["Sage Green"],
            ColorFamily::Neutrals => &["Sand", "Ivory", "Natural"],
            ColorFamily::Dark => &["Charon Charcoal", "Black"],
        }
    }

    /// Products without a color never match a color filter.
    pub fn matches(&self, product: &Product) -> bool {
        match product.color.as_deref() {
            Some(color) => self.members().iter().any(|m| color.contains(m)),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "XS")]
    ExtraSmall,
    #[serde(rename = "S")]
    Small,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
    #[serde(rename = "XL")]
    ExtraLarge,
    #[serde(rename = "One Size")]
    OneSize,
}

impl Size {
    pub fn available_for(category: Category) -> &'static [Size] {
        match category {
            Category::Apparel => &[
                Size::ExtraSmall,
                Size::Small,
                Size::Medium,
                Size::Large,
                Size::ExtraLarge,
            ],
            Category::Accessories => &[Size::OneSize],
        }
    }

    pub fn default_for(category: Category) -> Size {
        match category {
            Category::Apparel => Size::Medium,
            Category::Accessories => Size::OneSize,
        }
    }

    pub fn fits(&self, category: Category) -> bool {
        Size::available_for(category).contains(self)
    }
}
