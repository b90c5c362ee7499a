// src/models/journal.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub slug: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub date: NaiveDate,
    pub category: &'static str,
    pub image: String,
    pub excerpt: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct NewsletterSignup {
    pub email: String,
}
