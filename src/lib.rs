//! WhatsApp Booking Cart Library
//!
//! Core functionality for the booking backend of a home-services marketing
//! site: cart state management, coupon discounts, and the WhatsApp deep-link
//! checkout handoff.

// Domain modules
pub mod booking;
pub mod cart;

// Infrastructure
pub mod router;
