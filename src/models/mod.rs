// src/models/mod.rs
pub mod cart;
pub mod chat;
pub mod journal;
pub mod product;
pub mod review;
