// src/services/search.rs
use crate::catalog::catalog;
use crate::models::product::Product;

/// Case-insensitive substring search over title, category and color.
/// A blank query yields nothing rather than the whole catalog.
pub fn search(query: &str) -> Vec<&'static Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    catalog()
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.category.label().to_lowercase().contains(&needle)
                || p
                    .color
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&needle))
        })
        .collect()
}
