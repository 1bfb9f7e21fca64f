//! Booking Validator
//!
//! Gate-keeping check run immediately before the WhatsApp URL is built,
//! independent of the clamping already done at the mutation boundary. Its
//! quantity and price checks only fire on programming errors or corrupted
//! persisted state; the empty-cart check is the one visitors actually hit.

use crate::cart::models::{Cart, MAX_QUANTITY, MIN_QUANTITY};
use thiserror::Error;

/// Reasons a cart cannot proceed to the WhatsApp handoff.
///
/// The `Display` text is shown to the visitor verbatim, so it stays
/// remediation-oriented rather than technical.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("Your cart is empty. Please add a service before booking.")]
    EmptyCart,

    #[error("Invalid quantity for {service_name} ({quantity}); quantities must be between 1 and 10.")]
    InvalidQuantity { service_name: String, quantity: u32 },

    #[error("We couldn't price {service_name}. Please remove it and try again.")]
    InvalidPrice { service_name: String },
}

/// Checks the business invariants a cart must satisfy before booking.
///
/// Pure and synchronous; callers surface the error message and abort the
/// flow without constructing a URL.
pub fn validate_cart_for_booking(cart: &Cart) -> Result<(), BookingError> {
    if cart.is_empty() {
        return Err(BookingError::EmptyCart);
    }

    for item in &cart.items {
        if item.quantity < MIN_QUANTITY || item.quantity > MAX_QUANTITY {
            return Err(BookingError::InvalidQuantity {
                service_name: item.service_name.clone(),
                quantity: item.quantity,
            });
        }

        if item.price == 0 {
            return Err(BookingError::InvalidPrice {
                service_name: item.service_name.clone(),
            });
        }
    }

    Ok(())
}
