// src/middleware/rate_limit.rs
use crate::error::StoreError;
use crate::middleware::logging::client_key;
use crate::AppState;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Fixed-window request counter per client key.
#[derive(Clone)]
pub struct RateLimiter {
    // key -> (requests in window, window start)
    clients: Arc<Mutex<HashMap<String, (u32, Instant)>>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    pub fn check(&self, client: &str) -> bool {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> bool {
        let mut clients = match self.clients.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        // Drop stale windows so the map doesn't grow with every visitor.
        let window = self.window;
        clients.retain(|_, (_, start)| now.duration_since(*start) <= window);

        match clients.get_mut(client) {
            Some((count, _)) if *count >= self.max_requests => false,
            Some((count, _)) => {
                *count += 1;
                true
            }
            None => {
                clients.insert(client.to_string(), (1, now));
                true
            }
        }
    }
}

/// Guards the stylist endpoints; each message costs an upstream model call and
/// each new session is kept in memory until restart.
pub async fn chat_rate_limit_middleware(req: Request, next: Next) -> Response {
    enforce(req, next, "chat", |state| &state.chat_limiter).await
}

/// Guards cart creation. Carts are never evicted, so this is what keeps one
/// client from filling the store.
pub async fn cart_rate_limit_middleware(req: Request, next: Next) -> Response {
    enforce(req, next, "cart", |state| &state.cart_limiter).await
}

async fn enforce(
    req: Request,
    next: Next,
    scope: &'static str,
    pick: fn(&AppState) -> &RateLimiter,
) -> Response {
    let limiter = req
        .extensions()
        .get::<Arc<AppState>>()
        .map(|state| pick(state).clone());

    if let Some(limiter) = limiter {
        let client = client_key(&req);
        if !limiter.check(&client) {
            tracing::warn!(client = %client, scope, "rate limit exceeded");
            return StoreError::RateLimited.into_response();
        }
    }

    next.run(req).await
}
