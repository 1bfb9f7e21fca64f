//! Integration tests for the booking cart REST API
//!
//! These tests drive the full axum router the way the marketing site's
//! widget does: cart mutation endpoints, coupon application, the summary
//! view, and the WhatsApp booking handoff.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`

use booking_cart_rust::cart::AppState;
use booking_cart_rust::router::create_app_router;

/// Helper to create a test app instance backed by a throwaway data directory.
/// The TempDir must outlive the router, so it is returned alongside it.
fn create_test_app() -> (axum::Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let state = Arc::new(AppState::with_data_dir(dir.path().to_path_buf()));
    (create_app_router(state), dir)
}

/// Helper function to send a JSON request and get the response
async fn send_request(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, body)
}

fn window_item(quantity: u32) -> Value {
    json!({
        "serviceId": "aluminium-windows",
        "serviceName": "Aluminium Windows",
        "optionId": "standard-4x3",
        "optionName": "Standard Window (4x3 ft)",
        "price": 8500,
        "quantity": quantity,
        "image": "/images/windows/standard.jpg"
    })
}

#[tokio::test]
async fn add_item_returns_summary_with_totals() {
    let (app, _dir) = create_test_app();

    let (status, body) = send_request(
        &app,
        "/cart/add_item",
        json!({ "cartId": "c1", "item": window_item(2) }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cartId"], "c1");
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["subtotal"], 17000);
    assert_eq!(body["discount"], 0);
    assert_eq!(body["total"], 17000);
    assert_eq!(body["itemCount"], 2);
}

#[tokio::test]
async fn duplicate_add_merges_and_clamps() {
    let (app, _dir) = create_test_app();

    send_request(
        &app,
        "/cart/add_item",
        json!({ "cartId": "c1", "item": window_item(4) }),
    )
    .await;
    let (_, body) = send_request(
        &app,
        "/cart/add_item",
        json!({ "cartId": "c1", "item": window_item(3) }),
    )
    .await;

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1, "same (serviceId, optionId) must merge");
    assert_eq!(items[0]["quantity"], 7);

    // 7 + 6 = 13 clamps to the cap of 10.
    let (_, body) = send_request(
        &app,
        "/cart/add_item",
        json!({ "cartId": "c1", "item": window_item(6) }),
    )
    .await;
    assert_eq!(body["items"][0]["quantity"], 10);
}

#[tokio::test]
async fn oversized_quantity_is_clamped_on_first_add() {
    let (app, _dir) = create_test_app();

    let (_, body) = send_request(
        &app,
        "/cart/add_item",
        json!({ "cartId": "c1", "item": window_item(15) }),
    )
    .await;

    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["quantity"], 10);
    assert_eq!(body["subtotal"], 85000);
}

#[tokio::test]
async fn update_quantity_clamps_and_ignores_unknown_lines() {
    let (app, _dir) = create_test_app();

    send_request(
        &app,
        "/cart/add_item",
        json!({ "cartId": "c1", "item": window_item(2) }),
    )
    .await;

    let (_, body) = send_request(
        &app,
        "/cart/update_quantity",
        json!({
            "cartId": "c1",
            "serviceId": "aluminium-windows",
            "optionId": "standard-4x3",
            "quantity": 99
        }),
    )
    .await;
    assert_eq!(body["items"][0]["quantity"], 10);

    let (status, body) = send_request(
        &app,
        "/cart/update_quantity",
        json!({
            "cartId": "c1",
            "serviceId": "aluminium-windows",
            "optionId": "no-such-option",
            "quantity": 5
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["items"].as_array().unwrap().len(),
        1,
        "update must not create lines"
    );
}

#[tokio::test]
async fn remove_item_empties_the_cart() {
    let (app, _dir) = create_test_app();

    send_request(
        &app,
        "/cart/add_item",
        json!({ "cartId": "c1", "item": window_item(2) }),
    )
    .await;
    let (_, body) = send_request(
        &app,
        "/cart/remove_item",
        json!({
            "cartId": "c1",
            "serviceId": "aluminium-windows",
            "optionId": "standard-4x3"
        }),
    )
    .await;

    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["subtotal"], 0);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn percentage_coupon_discounts_the_summary() {
    let (app, _dir) = create_test_app();

    send_request(
        &app,
        "/cart/add_item",
        json!({
            "cartId": "c1",
            "item": {
                "serviceId": "glass-partition",
                "serviceName": "Glass Partition",
                "optionId": "frameless",
                "optionName": "Frameless",
                "price": 15000,
                "quantity": 1
            }
        }),
    )
    .await;
    send_request(
        &app,
        "/cart/add_item",
        json!({
            "cartId": "c1",
            "item": {
                "serviceId": "safety-netting",
                "serviceName": "Safety Netting",
                "optionId": "balcony",
                "optionName": "Balcony",
                "price": 3500,
                "quantity": 2
            }
        }),
    )
    .await;

    let (_, body) = send_request(
        &app,
        "/cart/apply_coupon",
        json!({ "cartId": "c1", "code": "welcome10" }),
    )
    .await;

    assert_eq!(body["applied"], true);
    assert_eq!(body["appliedCoupon"]["code"], "WELCOME10");
    assert_eq!(body["subtotal"], 22000);
    assert_eq!(body["discount"], 2200);
    assert_eq!(body["total"], 19800);
}

#[tokio::test]
async fn invalid_coupon_is_rejected_without_side_effects() {
    let (app, _dir) = create_test_app();

    send_request(
        &app,
        "/cart/add_item",
        json!({ "cartId": "c1", "item": window_item(1) }),
    )
    .await;
    send_request(
        &app,
        "/cart/apply_coupon",
        json!({ "cartId": "c1", "code": "WELCOME10" }),
    )
    .await;

    let (_, body) = send_request(
        &app,
        "/cart/apply_coupon",
        json!({ "cartId": "c1", "code": "NOTACODE" }),
    )
    .await;

    assert_eq!(body["applied"], false);
    assert_eq!(
        body["appliedCoupon"]["code"], "WELCOME10",
        "previously applied coupon must survive a rejected code"
    );
}

#[tokio::test]
async fn fixed_coupon_larger_than_subtotal_caps_total() {
    let (app, _dir) = create_test_app();

    send_request(
        &app,
        "/cart/add_item",
        json!({
            "cartId": "c1",
            "item": {
                "serviceId": "safety-netting",
                "serviceName": "Safety Netting",
                "optionId": "window-patch",
                "optionName": "Window Patch",
                "price": 200,
                "quantity": 1
            }
        }),
    )
    .await;

    let (_, body) = send_request(
        &app,
        "/cart/apply_coupon",
        json!({ "cartId": "c1", "code": "SAVE500" }),
    )
    .await;

    assert_eq!(body["applied"], true);
    assert_eq!(body["discount"], 500, "discount is reported verbatim");
    assert_eq!(body["total"], 0, "total is capped at zero");
}

#[tokio::test]
async fn remove_coupon_restores_full_total() {
    let (app, _dir) = create_test_app();

    send_request(
        &app,
        "/cart/add_item",
        json!({ "cartId": "c1", "item": window_item(2) }),
    )
    .await;
    send_request(
        &app,
        "/cart/apply_coupon",
        json!({ "cartId": "c1", "code": "FIRST20" }),
    )
    .await;

    let (_, body) = send_request(&app, "/cart/remove_coupon", json!({ "cartId": "c1" })).await;
    assert!(body["appliedCoupon"].is_null());
    assert_eq!(body["total"], body["subtotal"]);

    // Idempotent: removing again changes nothing.
    let (_, body) = send_request(&app, "/cart/remove_coupon", json!({ "cartId": "c1" })).await;
    assert!(body["appliedCoupon"].is_null());
    assert_eq!(body["total"], 17000);
}

#[tokio::test]
async fn clear_cart_resets_everything() {
    let (app, _dir) = create_test_app();

    send_request(
        &app,
        "/cart/add_item",
        json!({ "cartId": "c1", "item": window_item(2) }),
    )
    .await;
    send_request(
        &app,
        "/cart/apply_coupon",
        json!({ "cartId": "c1", "code": "SAVE500" }),
    )
    .await;

    let (_, body) = send_request(&app, "/cart/clear", json!({ "cartId": "c1" })).await;
    assert!(body["items"].as_array().unwrap().is_empty());
    assert!(body["appliedCoupon"].is_null());

    let (_, body) = send_request(&app, "/cart/summary", json!({ "cartId": "c1" })).await;
    assert_eq!(body["itemCount"], 0);
}

#[tokio::test]
async fn unknown_cart_reads_as_empty() {
    let (app, _dir) = create_test_app();

    let (status, body) = send_request(&app, "/cart/summary", json!({ "cartId": "ghost" })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["subtotal"], 0);
}

#[tokio::test]
async fn session_cookie_is_minted_and_reusable() {
    let (app, _dir) = create_test_app();

    // No cartId and no cookie: the server mints a session.
    let request = Request::builder()
        .method("POST")
        .uri("/cart/add_item")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "item": window_item(2) })).unwrap(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("new sessions must receive a cart_session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("cart_session="));

    // Replaying the cookie reaches the same cart.
    let request = Request::builder()
        .method("POST")
        .uri("/cart/summary")
        .header("content-type", "application/json")
        .header("cookie", cookie.split(';').next().unwrap())
        .body(Body::from(serde_json::to_string(&json!({})).unwrap()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();

    assert_eq!(body["itemCount"], 2);
}

#[tokio::test]
async fn booking_is_blocked_on_an_empty_cart() {
    let (app, _dir) = create_test_app();

    let (status, body) =
        send_request(&app, "/booking/whatsapp", json!({ "cartId": "empty" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isValid"], false);
    assert!(
        !body["error"].as_str().unwrap().is_empty(),
        "validator must explain the rejection"
    );
    assert!(body.get("url").is_none(), "no URL may be constructed");
}

#[tokio::test]
async fn booking_handoff_returns_deep_link_and_clears_cart() {
    let (app, _dir) = create_test_app();

    send_request(
        &app,
        "/cart/add_item",
        json!({ "cartId": "c1", "item": window_item(2) }),
    )
    .await;
    send_request(
        &app,
        "/cart/apply_coupon",
        json!({ "cartId": "c1", "code": "WELCOME10" }),
    )
    .await;

    let (status, body) = send_request(&app, "/booking/whatsapp", json!({ "cartId": "c1" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isValid"], true);

    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("https://wa.me/919082877332?text="));
    assert!(!url.contains(' '));

    let message = body["message"].as_str().unwrap();
    assert!(message.contains("• Aluminium Windows - Standard Window (4x3 ft)"));
    assert!(message.contains("₹8,500 × 2 = ₹17,000"));
    assert!(message.contains("Item Total: ₹17,000"));
    assert!(message.contains("Discount (WELCOME10): -₹1,700"));
    assert!(message.contains("Total Amount: ₹15,300"));

    // The handoff consumed the cart.
    let (_, body) = send_request(&app, "/cart/summary", json!({ "cartId": "c1" })).await;
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn booking_phone_override_reaches_the_url() {
    let (app, _dir) = create_test_app();

    send_request(
        &app,
        "/cart/add_item",
        json!({ "cartId": "c1", "item": window_item(1) }),
    )
    .await;

    let (_, body) = send_request(
        &app,
        "/booking/whatsapp",
        json!({ "cartId": "c1", "phoneNumber": "+91 98765 43210" }),
    )
    .await;

    assert_eq!(body["isValid"], true);
    assert!(body["url"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/919876543210?text="));
}
