//! Cart State Management
//!
//! The cart aggregate's mutation and pricing logic, plus the shared
//! application state that holds live carts keyed by cart id.
//!
//! All mutations are complete-or-no-op: nothing here returns an error, and a
//! call that finds nothing to do leaves the cart untouched. Totals are never
//! stored; they are recomputed from the items and the applied coupon.

use super::coupons::validate_coupon;
use super::helpers::clamp_quantity;
use super::models::{Cart, CartItem, DiscountType};
use super::persistence::CartFileStore;
use dashmap::DashMap;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

// =============================================================================
// Cart Operations
// =============================================================================

impl Cart {
    /// Adds `item` to the cart, merging with an existing line when the
    /// `(service_id, option_id)` pair is already present.
    ///
    /// Quantities are summed and clamped into [1, 10]; a brand-new line is
    /// clamped the same way. This operation cannot fail.
    pub fn add_item(&mut self, item: CartItem) {
        let incoming = clamp_quantity(item.quantity);
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.service_id == item.service_id && i.option_id == item.option_id)
        {
            existing.quantity = clamp_quantity(existing.quantity.saturating_add(incoming));
        } else {
            self.items.push(CartItem {
                quantity: incoming,
                ..item
            });
        }
    }

    /// Sets the quantity of the matching line, clamped into [1, 10].
    ///
    /// No-op when no line matches; it does not create one.
    pub fn update_quantity(&mut self, service_id: &str, option_id: &str, quantity: u32) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.service_id == service_id && i.option_id == option_id)
        {
            item.quantity = clamp_quantity(quantity);
        }
    }

    /// Removes the matching line, returning its snapshot for the analytics
    /// event. No-op (returns `None`) when absent.
    pub fn remove_item(&mut self, service_id: &str, option_id: &str) -> Option<CartItem> {
        let pos = self
            .items
            .iter()
            .position(|i| i.service_id == service_id && i.option_id == option_id)?;
        Some(self.items.remove(pos))
    }

    /// Applies a coupon by code, replacing any previously applied coupon.
    ///
    /// The code is trimmed and upper-cased before lookup. Returns `false`
    /// and leaves the cart unchanged when the code is unknown; this boolean
    /// is the sole coupon validation gate, so callers must branch on it.
    pub fn apply_coupon(&mut self, code: &str) -> bool {
        match validate_coupon(code) {
            Some(coupon) => {
                self.applied_coupon = Some(coupon);
                true
            }
            None => false,
        }
    }

    /// Clears the applied coupon. Idempotent.
    pub fn remove_coupon(&mut self) {
        self.applied_coupon = None;
    }

    /// Empties the cart: no items, no coupon.
    pub fn clear(&mut self) {
        self.items.clear();
        self.applied_coupon = None;
    }

    /// Sum of `price × quantity` across all lines; 0 for an empty cart.
    pub fn subtotal(&self) -> u64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Rupee amount deducted by the applied coupon.
    ///
    /// Percentage discounts round half-away-from-zero. Fixed discounts are
    /// returned verbatim even when larger than the subtotal; the capping
    /// happens in [`Cart::total`].
    pub fn discount(&self) -> u64 {
        match &self.applied_coupon {
            None => 0,
            Some(coupon) => match coupon.discount_type {
                DiscountType::Percentage => (self.subtotal() * coupon.discount + 50) / 100,
                DiscountType::Fixed => coupon.discount,
            },
        }
    }

    /// `max(0, subtotal − discount)`; a fixed discount larger than the
    /// subtotal bottoms out at zero rather than going negative.
    pub fn total(&self) -> u64 {
        self.subtotal().saturating_sub(self.discount())
    }

    /// Total units across all lines (not the number of distinct lines).
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state: live carts plus their file-backed persistence
pub struct AppState {
    /// In-memory storage for carts, keyed by cart_id.
    /// DashMap allows concurrent access without external Mutexes.
    pub carts: DashMap<String, Cart>,

    /// Best-effort durable storage; the in-memory cart stays authoritative
    /// for the session even when the store is unavailable.
    pub store: CartFileStore,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a new AppState with empty carts and locates the data directory
    pub fn new() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let data_dir = Self::locate_data_directory(&current_dir);

        tracing::info!(dir = %data_dir.display(), "using cart data directory");

        Self::with_data_dir(data_dir)
    }

    /// Creates an AppState persisting carts under the given directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            carts: DashMap::new(),
            store: CartFileStore::new(data_dir),
        }
    }

    /// Attempts to locate the data directory using a multi-step strategy
    fn locate_data_directory(current_dir: &Path) -> PathBuf {
        // Strategy to locate cart data:
        // 1. ./data
        // 2. ../data (if running from a subdir)
        // 3. Fallback to "data" relative path

        if current_dir.join("data").exists() {
            return current_dir.join("data");
        }

        if let Some(parent) = current_dir.parent() {
            if parent.join("data").exists() {
                return parent.join("data");
            }
        }

        PathBuf::from("data") // Fallback
    }

    /// Runs a mutation against the cart for `cart_id`, restoring it from the
    /// file store first if it is not live, and persisting the result.
    ///
    /// Returns the post-mutation snapshot plus the closure's output.
    pub async fn with_cart<T>(
        &self,
        cart_id: &str,
        mutate: impl FnOnce(&mut Cart) -> T,
    ) -> (Cart, T) {
        self.restore_if_absent(cart_id).await;

        let (snapshot, out) = {
            let mut entry = self.carts.entry(cart_id.to_string()).or_default();
            let out = mutate(entry.value_mut());
            (entry.value().clone(), out)
        };

        self.store.save_cart(cart_id, &snapshot).await;
        (snapshot, out)
    }

    /// Returns an immutable snapshot of the cart for `cart_id`, restoring
    /// from the file store when needed. Unknown carts read as empty.
    pub async fn snapshot(&self, cart_id: &str) -> Cart {
        self.restore_if_absent(cart_id).await;
        self.carts
            .get(cart_id)
            .map(|c| c.value().clone())
            .unwrap_or_default()
    }

    /// Drops the cart from memory and erases its stored state.
    pub async fn clear_cart(&self, cart_id: &str) {
        self.carts.remove(cart_id);
        self.store.clear_cart(cart_id).await;
    }

    async fn restore_if_absent(&self, cart_id: &str) {
        if self.carts.contains_key(cart_id) {
            return;
        }
        if let Some(cart) = self.store.load_cart(cart_id).await {
            self.carts.insert(cart_id.to_string(), cart);
        }
    }
}
