//! Analytics Event Sink
//!
//! Fire-and-forget notifications emitted alongside cart mutations and the
//! booking handoff. Nothing here affects control flow; the events land in the
//! structured log stream under the `analytics` target, where the log shipper
//! picks them up.

use super::models::CartItem;

/// Business events the marketing team tracks.
#[derive(Debug)]
pub enum CartEvent<'a> {
    ItemAdded { item: &'a CartItem },
    ItemRemoved { item: &'a CartItem },
    CouponApplied { code: &'a str },
    CouponRejected { code: &'a str },
    BookingInitiated { total: u64, item_count: u32 },
}

/// Emits an analytics event for the given cart. Never fails.
pub fn emit(cart_id: &str, event: &CartEvent<'_>) {
    match event {
        CartEvent::ItemAdded { item } => tracing::info!(
            target: "analytics",
            cart_id,
            service_id = %item.service_id,
            option_id = %item.option_id,
            quantity = item.quantity,
            price = item.price,
            "add_to_cart"
        ),
        CartEvent::ItemRemoved { item } => tracing::info!(
            target: "analytics",
            cart_id,
            service_id = %item.service_id,
            option_id = %item.option_id,
            quantity = item.quantity,
            "remove_from_cart"
        ),
        CartEvent::CouponApplied { code } => tracing::info!(
            target: "analytics",
            cart_id,
            code = %code,
            "coupon_applied"
        ),
        CartEvent::CouponRejected { code } => tracing::info!(
            target: "analytics",
            cart_id,
            code = %code,
            "coupon_rejected"
        ),
        CartEvent::BookingInitiated { total, item_count } => tracing::info!(
            target: "analytics",
            cart_id,
            total,
            item_count,
            "booking_initiated"
        ),
    }
}
