// src/handlers/mod.rs
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod journal;
pub mod reviews;
