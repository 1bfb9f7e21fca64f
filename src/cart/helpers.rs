//! Cart Business Logic Helpers
//!
//! Small, pure functions shared by the cart handlers: quantity clamping,
//! session-cookie resolution and cart id derivation.

use super::models::{MAX_QUANTITY, MIN_QUANTITY};
use axum::http::HeaderMap;
use uuid::Uuid;

/// Forces a requested quantity into the allowed [1, 10] range.
///
/// Out-of-range values are clamped, never rejected: 0 becomes 1, anything
/// above 10 becomes 10.
pub fn clamp_quantity(quantity: u32) -> u32 {
    quantity.clamp(MIN_QUANTITY, MAX_QUANTITY)
}

/// Resolves the session id from the `cart_session` cookie.
///
/// Returns the session id and whether it was freshly minted (in which case
/// the handler sets the cookie on the response).
pub fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    let existing = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                (name == "cart_session").then(|| value.to_string())
            })
        });

    match existing {
        Some(id) if !id.is_empty() => (id, false),
        _ => (Uuid::new_v4().simple().to_string(), true),
    }
}

/// Returns the explicit `cart_id` from the payload, or falls back to the
/// session id so every cart operation works with a non-empty identifier.
pub fn get_or_default_cart_id(cart_id: Option<String>, session_id: &str) -> String {
    match cart_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => session_id.to_string(),
    }
}
