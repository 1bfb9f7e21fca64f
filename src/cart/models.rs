//! Cart Domain Models
//!
//! Data structures for the booking cart: line items, applied coupons and the
//! cart aggregate, plus the request/response payloads used by the REST
//! handlers.

use serde::{Deserialize, Serialize};

// =============================================================================
// Constants
// =============================================================================

/// Schema version written alongside persisted carts. Stored carts with a
/// different version are discarded wholesale on load (no migration path).
pub const CART_VERSION: u32 = 1;

/// Smallest quantity a line item may carry.
pub const MIN_QUANTITY: u32 = 1;
/// Largest quantity a line item may carry.
pub const MAX_QUANTITY: u32 = 10;

/// Returns the default quantity (1) for cart items
fn default_quantity() -> u32 {
    1
}

fn default_version() -> u32 {
    // Absent version field counts as a mismatch so pre-versioning payloads
    // are thrown away rather than half-parsed.
    0
}

// =============================================================================
// Cart Domain Models
// =============================================================================

/// One selected service option in the cart.
///
/// The pair `(service_id, option_id)` uniquely identifies a line; adding the
/// same pair again merges quantities instead of creating a second line.
/// `service_name`/`option_name` are duplicated from the catalog so the booking
/// message can be rendered without a catalog lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Stable identifier of the parent service
    pub service_id: String,

    /// Display label of the service
    pub service_name: String,

    /// Identifier of the specific variant/option within the service
    pub option_id: String,

    /// Display label of the option
    pub option_name: String,

    /// Unit price in whole rupees (no paise)
    pub price: u64,

    /// Quantity of this item, kept within [1, 10] (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Representative image path; presentational only
    #[serde(default)]
    pub image: String,
}

impl CartItem {
    /// Line total in whole rupees (`price × quantity`).
    pub fn line_total(&self) -> u64 {
        self.price * u64::from(self.quantity)
    }
}

/// Discriminates the two kinds of coupon discounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount` is a percentage of the subtotal (0–100)
    Percentage,
    /// `discount` is a fixed rupee amount
    Fixed,
}

/// A coupon applied to the cart; at most one at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCoupon {
    /// Coupon code, stored upper-cased
    pub code: String,

    /// Percentage (0–100) or fixed rupee amount, depending on `discount_type`
    pub discount: u64,

    /// How to interpret `discount`
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
}

/// The cart aggregate: ordered line items plus an optional coupon.
///
/// Totals are never stored; they are recomputed on demand from `items` and
/// `applied_coupon` (see the methods in `state.rs`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Line items in insertion order (display order only, not pricing)
    pub items: Vec<CartItem>,

    /// The applied coupon, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_coupon: Option<AppliedCoupon>,

    /// Schema version tag checked by persistence on load
    #[serde(default = "default_version")]
    pub version: u32,
}

impl Default for Cart {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            applied_coupon: None,
            version: CART_VERSION,
        }
    }
}

// =============================================================================
// Request / Response Payloads
// =============================================================================

/// Input for POST /cart/add_item
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    /// The item to add or merge into the cart
    pub item: CartItem,

    /// Optional cart identifier
    pub cart_id: Option<String>,
}

/// Input for POST /cart/update_quantity
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityInput {
    pub service_id: String,
    pub option_id: String,
    /// Requested quantity; clamped into [1, 10] rather than rejected
    pub quantity: u32,
    pub cart_id: Option<String>,
}

/// Input for POST /cart/remove_item
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemInput {
    pub service_id: String,
    pub option_id: String,
    pub cart_id: Option<String>,
}

/// Input for POST /cart/apply_coupon
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCouponInput {
    /// Raw coupon code as typed by the visitor
    pub code: String,
    pub cart_id: Option<String>,
}

/// Input for operations that only need a cart reference
/// (remove_coupon, clear, summary)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartIdInput {
    pub cart_id: Option<String>,
}

/// Response for POST /cart/apply_coupon: the outcome flag plus the summary
#[derive(Debug, Serialize)]
pub struct CouponResponse {
    /// Whether the code resolved against the coupon table
    pub applied: bool,

    #[serde(flatten)]
    pub summary: CartSummary,
}

/// Response carrying the cart contents and its computed totals
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Cart identifier (echoed back so the widget can store it)
    pub cart_id: String,

    /// Current line items
    pub items: Vec<CartItem>,

    /// The applied coupon, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_coupon: Option<AppliedCoupon>,

    /// Sum of price × quantity across all lines
    pub subtotal: u64,

    /// Rupee amount deducted per the coupon rule (0 without a coupon)
    pub discount: u64,

    /// max(0, subtotal − discount)
    pub total: u64,

    /// Total units across all lines (not distinct lines)
    pub item_count: u32,
}
