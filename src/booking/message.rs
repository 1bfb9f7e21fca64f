//! Booking Message Formatter
//!
//! Renders a cart snapshot into the text the visitor sends the business over
//! WhatsApp. The business reads these messages by eye, so the labels and the
//! section order are a fixed contract; given the same cart the output is
//! byte-identical every time (no timestamps, no randomness).

use crate::cart::models::Cart;

/// Formats a rupee amount with Indian digit grouping: the last three digits,
/// then pairs (`8,500`, `17,000`, `1,00,000`). Whole rupees only.
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    let mut out = groups.join(",");
    out.push(',');
    out.push_str(tail);
    out
}

/// Renders the booking request message for a cart.
///
/// Layout: a fixed header, one two-line block per item, the item total, a
/// discount line (only when a coupon is applied and the discount is
/// positive), the total amount, two placeholder lines the business fills in
/// after receiving the message, and a closing confirmation request.
pub fn format_whatsapp_message(cart: &Cart) -> String {
    let blocks: Vec<String> = cart
        .items
        .iter()
        .map(|item| {
            format!(
                "• {} - {}\n  ₹{} × {} = ₹{}",
                item.service_name,
                item.option_name,
                format_inr(item.price),
                item.quantity,
                format_inr(item.line_total()),
            )
        })
        .collect();

    let mut message = String::from("New Booking Request\n\nServices:\n\n");
    message.push_str(&blocks.join("\n\n"));
    message.push_str("\n\n");

    message.push_str(&format!("Item Total: ₹{}\n", format_inr(cart.subtotal())));

    let discount = cart.discount();
    if discount > 0 {
        if let Some(coupon) = &cart.applied_coupon {
            message.push_str(&format!(
                "Discount ({}): -₹{}\n",
                coupon.code,
                format_inr(discount)
            ));
        }
    }

    message.push_str(&format!("Total Amount: ₹{}\n\n", format_inr(cart.total())));

    message.push_str("Location: ___________\n");
    message.push_str("Preferred Date: ___________\n\n");
    message.push_str("Please confirm my booking. Thank you!");

    message
}
