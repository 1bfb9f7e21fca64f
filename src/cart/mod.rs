//! Booking Cart Domain Module
//!
//! This module contains all cart business logic, including:
//! - Domain models (CartItem, AppliedCoupon, Cart, payloads)
//! - The static coupon table
//! - Cart operations and application state management
//! - File-backed cart persistence
//! - Analytics event emission
//! - REST API handlers

pub mod coupons;
pub mod events;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod persistence;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use state::{AppState, SharedState};
