//! REST API handler for the booking handoff
//!
//! The "Book Now" endpoint: validates the cart, renders the booking message
//! and responds with the `wa.me` URL the widget opens in a new browsing
//! context. Validation failures come back as `isValid: false` with a
//! user-facing error, and no URL is constructed.

use super::message::format_whatsapp_message;
use super::validator::validate_cart_for_booking;
use super::whatsapp::build_whatsapp_url;
use crate::cart::events::{self, CartEvent};
use crate::cart::handlers::with_session_cookie;
use crate::cart::helpers::{get_or_default_cart_id, resolve_session_id};
use crate::cart::state::SharedState;
use axum::{
    extract::State, http::HeaderMap, response::IntoResponse, routing::post, Json, Router,
};
use serde::Deserialize;
use serde_json::json;

/// Creates routes for booking-related operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/booking/whatsapp", post(whatsapp_booking))
}

/// Input for POST /booking/whatsapp
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    /// Optional cart identifier
    pub cart_id: Option<String>,

    /// Overrides the configured business number (used by the staging site)
    pub phone_number: Option<String>,
}

/// Endpoint: POST /booking/whatsapp
/// Gates the cart through the validator, then returns the deep link and the
/// formatted message. A successful handoff clears the cart.
async fn whatsapp_booking(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<BookingInput>,
) -> impl IntoResponse {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let cart_id = get_or_default_cart_id(payload.cart_id, &session_id);

    let cart = state.snapshot(&cart_id).await;

    let body = match validate_cart_for_booking(&cart) {
        Err(err) => {
            tracing::info!(%cart_id, error = %err, "booking blocked by validator");
            json!({
                "isValid": false,
                "error": err.to_string(),
            })
        }
        Ok(()) => {
            let message = format_whatsapp_message(&cart);
            let url = build_whatsapp_url(&cart, payload.phone_number.as_deref());

            let event = CartEvent::BookingInitiated {
                total: cart.total(),
                item_count: cart.item_count(),
            };
            events::emit(&cart_id, &event);

            // The booking left our hands; the next visit starts fresh.
            state.clear_cart(&cart_id).await;

            json!({
                "isValid": true,
                "cartId": cart_id,
                "url": url,
                "message": message,
            })
        }
    };

    with_session_cookie(Json(body).into_response(), &session_id, is_new_session)
}
