//! Static Coupon Table
//!
//! Read-only lookup of coupon code → discount rule. The table mirrors the
//! codes printed on existing marketing material, so the entries must not be
//! changed without coordinating with the business. There is no expiry or
//! usage-count logic; validation is idempotent and side-effect free.

use super::models::{AppliedCoupon, DiscountType};

/// One row of the coupon table.
#[derive(Debug, Clone, Copy)]
pub struct CouponRule {
    pub code: &'static str,
    pub discount: u64,
    pub discount_type: DiscountType,
}

/// Active coupon codes and their discount rules.
pub const COUPONS: &[CouponRule] = &[
    CouponRule {
        code: "WELCOME10",
        discount: 10,
        discount_type: DiscountType::Percentage,
    },
    CouponRule {
        code: "SAVE500",
        discount: 500,
        discount_type: DiscountType::Fixed,
    },
    CouponRule {
        code: "FIRST20",
        discount: 20,
        discount_type: DiscountType::Percentage,
    },
];

/// Canonical form of a coupon code: trimmed and upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Case-insensitive coupon lookup.
///
/// Returns the resolved rule (carrying the normalized code) or `None` when
/// the code is unknown.
pub fn validate_coupon(code: &str) -> Option<AppliedCoupon> {
    let normalized = normalize_code(code);
    COUPONS
        .iter()
        .find(|rule| rule.code == normalized)
        .map(|rule| AppliedCoupon {
            code: normalized,
            discount: rule.discount,
            discount_type: rule.discount_type,
        })
}
