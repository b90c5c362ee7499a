// src/services/mod.rs
pub mod cart;
pub mod listing;
pub mod reviews;
pub mod search;
pub mod stylist;
pub mod variants;
