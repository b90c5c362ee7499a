// src/config.rs
use std::{env, fmt::Display, str::FromStr, time::Duration};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Runtime configuration, read once at startup from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub stylist_temperature: f32,
    pub stylist_timeout: Duration,
    pub chat_rate_limit: u32,
    pub cart_rate_limit: u32,
    pub rate_limit_window: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            stylist_temperature: 0.7,
            stylist_timeout: Duration::from_secs(30),
            chat_rate_limit: 20,
            cart_rate_limit: 30,
            rate_limit_window: Duration::from_secs(60),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            stylist_temperature: try_load("STYLIST_TEMPERATURE", defaults.stylist_temperature),
            stylist_timeout: Duration::from_secs(try_load(
                "STYLIST_TIMEOUT_SECS",
                defaults.stylist_timeout.as_secs(),
            )),
            chat_rate_limit: try_load("CHAT_RATE_LIMIT", defaults.chat_rate_limit),
            cart_rate_limit: try_load("CART_RATE_LIMIT", defaults.cart_rate_limit),
            rate_limit_window: Duration::from_secs(try_load(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window.as_secs(),
            )),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid {} value '{}': {}, using default: {}", key, raw, e, default);
            default
        }),
        Err(_) => default,
    }
}
