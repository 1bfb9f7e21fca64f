//! WhatsApp URL Builder
//!
//! Produces the `https://wa.me/<number>?text=<encoded>` deep link that hands
//! the booking over to WhatsApp. Opening the link happens in the visitor's
//! browser; once it does, this system has no feedback channel and the
//! transaction leaves its control.

use super::message::format_whatsapp_message;
use crate::cart::models::Cart;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// The business's WhatsApp number as printed on the site.
pub const BUSINESS_WHATSAPP_NUMBER: &str = "+91 90828 77332";

/// Percent-encoding set matching JavaScript's `encodeURIComponent`:
/// alphanumerics and `-_.!~*'()` pass through, everything else (spaces,
/// newlines, `₹`, emoji) is encoded so the message survives the query string.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Strips everything but ASCII digits; `wa.me` takes the international
/// number with no `+`, spaces or dashes.
pub fn digits_only(phone_number: &str) -> String {
    phone_number.chars().filter(char::is_ascii_digit).collect()
}

/// Builds the WhatsApp deep link for a cart.
///
/// Uses `phone_number` when given, otherwise the configured business number.
/// The message is rendered via the formatter and percent-encoded as the
/// `text` query parameter.
pub fn build_whatsapp_url(cart: &Cart, phone_number: Option<&str>) -> String {
    let number = digits_only(phone_number.unwrap_or(BUSINESS_WHATSAPP_NUMBER));
    let message = format_whatsapp_message(cart);
    let encoded = utf8_percent_encode(&message, URI_COMPONENT);

    format!("https://wa.me/{}?text={}", number, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::models::CartItem;

    fn cart_with_one_item() -> Cart {
        let mut cart = Cart::default();
        cart.add_item(CartItem {
            service_id: "aluminium-windows".into(),
            service_name: "Aluminium Windows".into(),
            option_id: "standard".into(),
            option_name: "Standard Window (4x3 ft)".into(),
            price: 8500,
            quantity: 2,
            image: String::new(),
        });
        cart
    }

    #[test]
    fn strips_formatting_from_phone_numbers() {
        assert_eq!(digits_only("+91 90828 77332"), "919082877332");
        assert_eq!(digits_only("+91-90828-77332"), "919082877332");
        assert_eq!(digits_only("919082877332"), "919082877332");
    }

    #[test]
    fn url_targets_business_number_by_default() {
        let url = build_whatsapp_url(&cart_with_one_item(), None);
        assert!(url.starts_with("https://wa.me/919082877332?text="));
    }

    #[test]
    fn phone_override_is_used() {
        let url = build_whatsapp_url(&cart_with_one_item(), Some("+91 98765 43210"));
        assert!(url.starts_with("https://wa.me/919876543210?text="));
    }

    #[test]
    fn message_is_percent_encoded() {
        let url = build_whatsapp_url(&cart_with_one_item(), None);
        let text = url.split_once("?text=").unwrap().1;

        assert!(text.starts_with("New%20Booking%20Request%0A%0A"));
        assert!(text.contains("%E2%82%B9"), "rupee sign survives as UTF-8");
        assert!(text.contains("%C3%97"), "multiplication sign is encoded");
        assert!(!text.contains(' '), "no raw spaces in the query string");
        assert!(!text.contains('\n'), "no raw newlines in the query string");
    }

    #[test]
    fn parenthesised_option_names_pass_through_unencoded() {
        // encodeURIComponent leaves ( ) ! ~ * ' - _ . untouched.
        let url = build_whatsapp_url(&cart_with_one_item(), None);
        assert!(url.contains("(4x3%20ft)"));
    }
}
