//! Booking Handoff Module
//!
//! Turns a cart snapshot into a WhatsApp booking: message formatting, the
//! pre-handoff validation gate, the `wa.me` deep-link builder and the REST
//! endpoint the widget calls on "Book Now".

pub mod handlers;
pub mod message;
pub mod validator;
pub mod whatsapp;

// Re-export commonly used functions for convenience
pub use handlers::routes;
pub use message::format_whatsapp_message;
pub use validator::{validate_cart_for_booking, BookingError};
pub use whatsapp::build_whatsapp_url;
