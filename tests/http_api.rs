use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use terramuse::config::Config;
use terramuse::gemini_client::RelayError;
use terramuse::models::chat::ChatTurn;
use terramuse::services::stylist::{ChatRelay, DisabledRelay, FALLBACK_REPLY};
use terramuse::{app, AppState};
use tower::ServiceExt;

struct ScriptedRelay;

#[async_trait]
impl ChatRelay for ScriptedRelay {
    async fn reply(&self, history: &[ChatTurn], message: &str) -> Result<String, RelayError> {
        Ok(format!("[{}] Consider the Terra Midi Dress for: {}", history.len(), message))
    }
}

fn make_app_with(config: Config, relay: Arc<dyn ChatRelay>) -> Router {
    app(Arc::new(AppState::with_relay(&config, relay, true)))
}

fn make_app() -> Router {
    make_app_with(Config::default(), Arc::new(ScriptedRelay))
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn ids(products: &Value) -> Vec<u64> {
    products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_status_reports_catalog() {
    let app = make_app();
    let (status, body) = call(&app, "GET", "/api/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"], 17);
    assert_eq!(body["stylist"], "enabled");
    assert_eq!(body["open_carts"], 0);
}

#[tokio::test]
async fn test_listing_filters_and_sorts() {
    let app = make_app();

    let (status, body) =
        call(&app, "GET", "/api/listings/accessories?category=jewelry", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["products"]), vec![8, 11, 13]);

    let (_, body) = call(&app, "GET", "/api/listings/apparel?sort=price-low-high", None).await;
    let prices: Vec<f64> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));

    let (_, body) = call(&app, "GET", "/api/listings/apparel?color=sage", None).await;
    assert_eq!(ids(&body["products"]), vec![4, 16]);
}

#[tokio::test]
async fn test_listing_load_more() {
    let app = make_app();
    let (_, body) = call(&app, "GET", "/api/listings/new-arrivals?visible=3", None).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 3);
    assert_eq!(body["has_more"], true);
    assert_eq!(body["next_visible"], 6);
    assert_eq!(ids(&body["highlights"]), vec![1, 14]);
    assert_eq!(body["total"], 6);
    let grid = ids(&body["products"]);
    assert!(!grid.contains(&1) && !grid.contains(&14));
    assert_eq!(body["products"][0]["is_new"], true);
}

#[tokio::test]
async fn test_listing_rejects_unknown_shelf_and_sort() {
    let app = make_app();
    let (status, _) = call(&app, "GET", "/api/listings/shoes", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&app, "GET", "/api/listings/apparel?sort=random", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_detail_and_redirect() {
    let app = make_app();
    let (status, body) = call(&app, "GET", "/api/products/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["title"], "Terra Midi Dress");
    assert_eq!(body["default_size"], "M");
    assert_eq!(body["related"].as_array().unwrap().len(), 4);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/products/404").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/api/listings/new-arrivals"
    );
}

#[tokio::test]
async fn test_image_filter() {
    let app = make_app();
    let (status, body) =
        call(&app, "GET", "/api/products/4/image-filter?color=Sand", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filter"], "brightness(1.1) sepia(0.2) saturate(0.5)");

    let (_, body) =
        call(&app, "GET", "/api/products/4/image-filter?color=Sage%20Green", None).await;
    assert_eq!(body["filter"], Value::Null);
}

#[tokio::test]
async fn test_search() {
    let app = make_app();
    let (_, body) = call(&app, "GET", "/api/search?q=Scarf", None).await;
    assert_eq!(ids(&body["results"]), vec![10]);

    let (_, body) = call(&app, "GET", "/api/search?q=%20%20", None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_cart_flow() {
    let app = make_app();
    let (status, cart) = call(&app, "POST", "/api/carts", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let cart_id = cart["cart_id"].as_str().unwrap().to_string();
    let items = format!("/api/carts/{}/items", cart_id);

    let (status, cart) = call(&app, "POST", &items, Some(json!({ "product_id": 17 }))).await;
    assert_eq!(status, StatusCode::OK);
    let line = &cart["lines"][0];
    assert_eq!(line["size"], "M");
    assert_eq!(line["color"], "Terracotta");
    let line_id = line["line_id"].as_str().unwrap().to_string();
    let line_uri = format!("{}/{}", items, line_id);

    let (_, cart) = call(&app, "PATCH", &line_uri, Some(json!({ "delta": 2 }))).await;
    assert_eq!(cart["summary"]["total_items"], 3);
    assert_eq!(cart["summary"]["subtotal"], "390");

    let (_, cart) = call(&app, "PATCH", &line_uri, Some(json!({ "delta": -10 }))).await;
    assert_eq!(cart["lines"][0]["qty"], 1);

    let (status, _) = call(
        &app,
        "POST",
        &items,
        Some(json!({ "product_id": 9, "size": "XL" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, cart) = call(&app, "DELETE", &line_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(cart["lines"].as_array().unwrap().is_empty());

    let (status, _) = call(&app, "DELETE", &line_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cart_quantities_capped() {
    let app = make_app();
    let (_, cart) = call(&app, "POST", "/api/carts", None).await;
    let cart_uri = format!("/api/carts/{}", cart["cart_id"].as_str().unwrap());
    let items = format!("{}/items", cart_uri);

    let (status, body) = call(
        &app,
        "POST",
        &items,
        Some(json!({ "product_id": 9, "qty": 3_000_000_000u64 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    for product_id in [9, 10] {
        let (status, _) = call(
            &app,
            "POST",
            &items,
            Some(json!({ "product_id": product_id, "qty": 99 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let line_id = {
        let (_, cart) = call(&app, "GET", &cart_uri, None).await;
        cart["lines"][0]["line_id"].as_str().unwrap().to_string()
    };
    let (_, cart) = call(
        &app,
        "PATCH",
        &format!("{}/{}", items, line_id),
        Some(json!({ "delta": 2_000_000_000 })),
    )
    .await;
    assert_eq!(cart["lines"][0]["qty"], 99);

    let (status, cart) = call(&app, "GET", &cart_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["summary"]["total_items"], 198);
}

#[tokio::test]
async fn test_cart_creation_rate_limited() {
    let config = Config { cart_rate_limit: 2, ..Config::default() };
    let app = make_app_with(config, Arc::new(ScriptedRelay));

    let (_, cart) = call(&app, "POST", "/api/carts", None).await;
    assert_eq!(call(&app, "POST", "/api/carts", None).await.0, StatusCode::CREATED);
    let (status, body) = call(&app, "POST", "/api/carts", None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(body["error"].is_string());

    // Existing carts stay usable.
    let uri = format!("/api/carts/{}/items", cart["cart_id"].as_str().unwrap());
    let (status, _) = call(&app, "POST", &uri, Some(json!({ "product_id": 9 }))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_cart() {
    let app = make_app();
    let (status, body) = call(
        &app,
        "GET",
        "/api/carts/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_reviews_prepend_and_average() {
    let app = make_app();
    let uri = "/api/products/5/reviews";

    let (status, body) = call(&app, "GET", uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["average_rating"], Value::Null);

    call(&app, "POST", uri, Some(json!({ "author": "Ana", "rating": 5, "body": "Lovely weave." }))).await;
    let (status, body) = call(
        &app,
        "POST",
        uri,
        Some(json!({ "author": "Bea", "rating": 2, "body": "Too long on me." })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["reviews"][0]["author"], "Bea");
    assert_eq!(body["average_rating"], 3.5);

    for rating in [json!(9), json!(300), json!(4.5), json!("five")] {
        let (status, body) = call(
            &app,
            "POST",
            uri,
            Some(json!({ "author": "Cy", "rating": rating, "body": "!" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "rating {}", rating);
        assert!(body["error"].is_string());
    }

    let (status, _) = call(&app, "GET", "/api/products/77/reviews", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_journal_and_newsletter() {
    let app = make_app();
    let (_, body) = call(&app, "GET", "/api/journal", None).await;
    assert_eq!(body.as_array().unwrap().len(), 5);

    let (status, body) = call(&app, "GET", "/api/journal/rituals-of-morning", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2023-07-22");

    let (status, _) = call(&app, "GET", "/api/journal/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "POST", "/api/newsletter", Some(json!({ "email": " " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) =
        call(&app, "POST", "/api/newsletter", Some(json!({ "email": "fern@example.org" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subscribed"], true);
}

#[tokio::test]
async fn test_stylist_conversation() {
    let app = make_app();
    let (status, session) = call(&app, "POST", "/api/stylist/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(session["messages"].as_array().unwrap().len(), 1);
    assert_eq!(session["messages"][0]["role"], "model");

    let uri = format!(
        "/api/stylist/sessions/{}/messages",
        session["session_id"].as_str().unwrap()
    );

    let (status, body) = call(&app, "POST", &uri, Some(json!({ "text": "   " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], Value::Null);
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);

    let (_, body) = call(&app, "POST", &uri, Some(json!({ "text": "a desert wedding" }))).await;
    assert_eq!(
        body["reply"]["text"],
        "[0] Consider the Terra Midi Dress for: a desert wedding"
    );
    assert_eq!(body["messages"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_stylist_failure_uses_fallback() {
    let app = make_app_with(Config::default(), Arc::new(DisabledRelay));
    let (_, session) = call(&app, "POST", "/api/stylist/sessions", None).await;
    let uri = format!(
        "/api/stylist/sessions/{}/messages",
        session["session_id"].as_str().unwrap()
    );

    let (status, body) = call(&app, "POST", &uri, Some(json!({ "text": "hello" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"]["text"], FALLBACK_REPLY);
}

#[tokio::test]
async fn test_stylist_rate_limited() {
    let config = Config { chat_rate_limit: 2, ..Config::default() };
    let app = make_app_with(config, Arc::new(ScriptedRelay));

    assert_eq!(call(&app, "POST", "/api/stylist/sessions", None).await.0, StatusCode::CREATED);
    assert_eq!(call(&app, "POST", "/api/stylist/sessions", None).await.0, StatusCode::CREATED);
    assert_eq!(
        call(&app, "POST", "/api/stylist/sessions", None).await.0,
        StatusCode::TOO_MANY_REQUESTS
    );
    // Browsing is not throttled.
    assert_eq!(call(&app, "GET", "/api/catalog", None).await.0, StatusCode::OK);
}
