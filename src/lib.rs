// lib.rs - TerraMuse storefront service: domain modules and the HTTP router
pub mod catalog;
pub mod config;
pub mod error;
pub mod gemini_client;
pub mod handlers;
pub mod journal;
pub mod middleware;
pub mod models;
pub mod services;
pub mod taxonomy;

use axum::{response::Html, routing::get, Extension, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use config::Config;
use middleware::rate_limit::RateLimiter;
use services::cart::CartStore;
use services::reviews::ReviewStore;
use services::stylist::{default_persona_prompt, ChatRelay, DisabledRelay, StylistDesk};

// AppState holds everything that lives for the life of the process: carts, reviews,
// stylist sessions and the chat relay. Nothing here is persisted or evicted; the
// rate limiters on cart and session creation bound how fast the maps can grow.
pub struct AppState {
    pub carts: CartStore,
    pub reviews: ReviewStore,
    pub stylist: StylistDesk,
    pub chat_limiter: RateLimiter,
    pub cart_limiter: RateLimiter,
    pub stylist_enabled: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let relay: Option<Arc<dyn ChatRelay>> = match &config.gemini_api_key {
            Some(api_key) => {
                tracing::info!("Initializing Gemini stylist relay ({})...", config.gemini_model);
                match gemini_client::GeminiClient::new(
                    api_key.clone(),
                    config.gemini_base_url.clone(),
                    config.gemini_model.clone(),
                    default_persona_prompt(),
                    config.stylist_temperature,
                    config.stylist_timeout,
                ) {
                    Ok(client) => Some(Arc::new(client) as Arc<dyn ChatRelay>),
                    Err(e) => {
                        tracing::error!("Failed to build Gemini client: {}", e);
                        None
                    }
                }
            }
            None => {
                tracing::warn!("GEMINI_API_KEY not found. Muse will answer with the fallback message.");
                None
            }
        };

        let stylist_enabled = relay.is_some();
        let relay = relay.unwrap_or_else(|| Arc::new(DisabledRelay) as Arc<dyn ChatRelay>);
        Self::with_relay(config, relay, stylist_enabled)
    }

    /// Builds state around an explicit relay, e.g. a fake in tests.
    pub fn with_relay(config: &Config, relay: Arc<dyn ChatRelay>, stylist_enabled: bool) -> Self {
        Self {
            carts: CartStore::new(),
            reviews: ReviewStore::new(),
            stylist: StylistDesk::new(relay),
            chat_limiter: RateLimiter::new(config.chat_rate_limit, config.rate_limit_window),
            cart_limiter: RateLimiter::new(config.cart_rate_limit, config.rate_limit_window),
            stylist_enabled,
        }
    }
}

/// The full application router with shared state and middleware attached.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(handlers::catalog::catalog_routes())
        .merge(handlers::cart::cart_routes())
        .merge(handlers::reviews::review_routes())
        .merge(handlers::journal::journal_routes())
        .merge(handlers::chat::chat_routes())
        .route("/api/status", get(api_status))
        .route("/api/docs", get(api_documentation))
        .layer(axum::middleware::from_fn(middleware::logging::request_logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}

async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "products": catalog::catalog().len(),
        "open_carts": state.carts.cart_count().await,
        "open_sessions": state.stylist.session_count().await,
        "stylist": if state.stylist_enabled { "enabled" } else { "fallback-only" },
    }))
}

async fn api_documentation() -> Html<&'static str> {
    Html(
        r###"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>TerraMuse - API</title></head>
<body>
<h1>TerraMuse Storefront API</h1>
<h2>Catalog</h2>
<ul>
<li><code>GET /api/catalog</code></li>
<li><code>GET /api/listings/{apparel|accessories|new-arrivals}?category=&amp;color=&amp;size=&amp;sort=&amp;visible=</code></li>
<li><code>GET /api/products/:id</code> (unknown ids redirect to new arrivals)</li>
<li><code>GET /api/products/:id/image-filter?color=</code></li>
<li><code>GET /api/search?q=</code></li>
</ul>
<h2>Bag</h2>
<ul>
<li><code>POST /api/carts</code> (rate limited), <code>GET /api/carts/:cart_id</code></li>
<li><code>POST /api/carts/:cart_id/items</code> <code>{product_id, size?, color?, qty?}</code></li>
<li><code>PATCH /api/carts/:cart_id/items/:line_id</code> <code>{delta}</code></li>
<li><code>DELETE /api/carts/:cart_id/items/:line_id</code></li>
</ul>
<h2>Reviews &amp; Journal</h2>
<ul>
<li><code>GET|POST /api/products/:id/reviews</code> <code>{author, rating, title?, body}</code></li>
<li><code>GET /api/journal</code>, <code>GET /api/journal/:slug</code></li>
<li><code>POST /api/newsletter</code> <code>{email}</code></li>
</ul>
<h2>Muse stylist</h2>
<ul>
<li><code>POST /api/stylist/sessions</code>, <code>GET /api/stylist/sessions/:session_id</code></li>
<li><code>POST /api/stylist/sessions/:session_id/messages</code> <code>{text}</code></li>
</ul>
</body>
</html>"###,
    )
}
