//! REST API handlers for cart operations
//!
//! HTTP endpoints the marketing site's widget calls to mutate a visitor's
//! cart and read its computed totals. Every endpoint accepts an optional
//! `cartId`; without one the cart is keyed by the `cart_session` cookie,
//! which is minted here on first contact.

use super::events::{self, CartEvent};
use super::helpers::{get_or_default_cart_id, resolve_session_id};
use super::models::*;
use super::state::SharedState;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart/add_item", post(add_item))
        .route("/cart/update_quantity", post(update_quantity))
        .route("/cart/remove_item", post(remove_item))
        .route("/cart/apply_coupon", post(apply_coupon))
        .route("/cart/remove_coupon", post(remove_coupon))
        .route("/cart/clear", post(clear_cart))
        .route("/cart/summary", post(summary))
}

/// Builds the cart-plus-totals payload every endpoint responds with.
pub(crate) fn summarize(cart_id: String, cart: &Cart) -> CartSummary {
    CartSummary {
        subtotal: cart.subtotal(),
        discount: cart.discount(),
        total: cart.total(),
        item_count: cart.item_count(),
        items: cart.items.clone(),
        applied_coupon: cart.applied_coupon.clone(),
        cart_id,
    }
}

/// Attaches the `cart_session` cookie when the session was freshly minted.
pub(crate) fn with_session_cookie(
    mut response: Response,
    session_id: &str,
    is_new_session: bool,
) -> Response {
    if is_new_session {
        let cookie_val = format!("cart_session={}; Path=/; HttpOnly", session_id);
        response
            .headers_mut()
            .insert(axum::http::header::SET_COOKIE, cookie_val.parse().unwrap());
    }
    response
}

/// Endpoint: POST /cart/add_item
/// Adds an item, merging quantities on a duplicate (serviceId, optionId).
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<AddItemInput>,
) -> impl IntoResponse {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let cart_id = get_or_default_cart_id(payload.cart_id, &session_id);

    events::emit(&cart_id, &CartEvent::ItemAdded { item: &payload.item });

    let (cart, _) = state
        .with_cart(&cart_id, |cart| cart.add_item(payload.item))
        .await;

    let response = Json(summarize(cart_id, &cart)).into_response();
    with_session_cookie(response, &session_id, is_new_session)
}

/// Endpoint: POST /cart/update_quantity
/// Clamps the requested quantity into [1, 10]; no-op for unknown lines.
async fn update_quantity(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateQuantityInput>,
) -> impl IntoResponse {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let cart_id = get_or_default_cart_id(payload.cart_id, &session_id);

    let (cart, _) = state
        .with_cart(&cart_id, |cart| {
            cart.update_quantity(&payload.service_id, &payload.option_id, payload.quantity)
        })
        .await;

    let response = Json(summarize(cart_id, &cart)).into_response();
    with_session_cookie(response, &session_id, is_new_session)
}

/// Endpoint: POST /cart/remove_item
/// Deletes the matching line; emits a removal event when one existed.
async fn remove_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<RemoveItemInput>,
) -> impl IntoResponse {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let cart_id = get_or_default_cart_id(payload.cart_id, &session_id);

    let (cart, removed) = state
        .with_cart(&cart_id, |cart| {
            cart.remove_item(&payload.service_id, &payload.option_id)
        })
        .await;

    if let Some(item) = removed {
        events::emit(&cart_id, &CartEvent::ItemRemoved { item: &item });
    }

    let response = Json(summarize(cart_id, &cart)).into_response();
    with_session_cookie(response, &session_id, is_new_session)
}

/// Endpoint: POST /cart/apply_coupon
/// Validates the code against the static table; `applied` reports the
/// outcome and an unknown code leaves the cart untouched.
async fn apply_coupon(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<ApplyCouponInput>,
) -> impl IntoResponse {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let cart_id = get_or_default_cart_id(payload.cart_id, &session_id);

    let (cart, applied) = state
        .with_cart(&cart_id, |cart| cart.apply_coupon(&payload.code))
        .await;

    if applied {
        events::emit(&cart_id, &CartEvent::CouponApplied { code: &payload.code });
    } else {
        events::emit(&cart_id, &CartEvent::CouponRejected { code: &payload.code });
    }

    let response = Json(CouponResponse {
        applied,
        summary: summarize(cart_id, &cart),
    })
    .into_response();
    with_session_cookie(response, &session_id, is_new_session)
}

/// Endpoint: POST /cart/remove_coupon
async fn remove_coupon(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<CartIdInput>,
) -> impl IntoResponse {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let cart_id = get_or_default_cart_id(payload.cart_id, &session_id);

    let (cart, _) = state
        .with_cart(&cart_id, |cart| cart.remove_coupon())
        .await;

    let response = Json(summarize(cart_id, &cart)).into_response();
    with_session_cookie(response, &session_id, is_new_session)
}

/// Endpoint: POST /cart/clear
/// Empties the cart and erases its persisted state.
async fn clear_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<CartIdInput>,
) -> impl IntoResponse {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let cart_id = get_or_default_cart_id(payload.cart_id, &session_id);

    state.clear_cart(&cart_id).await;

    let response = Json(summarize(cart_id, &Cart::default())).into_response();
    with_session_cookie(response, &session_id, is_new_session)
}

/// Endpoint: POST /cart/summary
/// Read-only view of the cart and its computed totals.
async fn summary(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<CartIdInput>,
) -> impl IntoResponse {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let cart_id = get_or_default_cart_id(payload.cart_id, &session_id);

    let cart = state.snapshot(&cart_id).await;

    let response = Json(summarize(cart_id, &cart)).into_response();
    with_session_cookie(response, &session_id, is_new_session)
}
