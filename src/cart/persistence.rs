//! Cart Persistence
//!
//! Best-effort durable storage of carts as one JSON file per cart id under a
//! data directory. Persistence is a cache, never a correctness requirement:
//! every IO or parse failure degrades to "no stored cart" and the in-memory
//! state carries the session.
//!
//! Stored payloads carry the cart's `version` tag. A mismatch (including an
//! absent tag) discards the file wholesale; there is no migration path.

use super::models::{Cart, CART_VERSION};
use std::path::PathBuf;

/// File-backed store for cart aggregates.
#[derive(Debug, Clone)]
pub struct CartFileStore {
    data_dir: PathBuf,
}

impl CartFileStore {
    /// Creates a store rooted at `data_dir`. The directory is created lazily
    /// on the first save.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Serializes the cart under its cart id. Failures are logged at warn
    /// level and swallowed.
    pub async fn save_cart(&self, cart_id: &str, cart: &Cart) {
        let Some(path) = self.cart_path(cart_id) else {
            return;
        };

        let json = match serde_json::to_vec(cart) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(cart_id, %err, "failed to serialize cart");
                return;
            }
        };

        if let Err(err) = tokio::fs::create_dir_all(&self.data_dir).await {
            tracing::warn!(cart_id, %err, "failed to create cart data directory");
            return;
        }

        if let Err(err) = tokio::fs::write(&path, json).await {
            tracing::warn!(cart_id, %err, "failed to persist cart");
        }
    }

    /// Loads the stored cart for `cart_id`.
    ///
    /// Returns `None` when the file is absent, unreadable, unparsable, or
    /// carries a version other than [`CART_VERSION`]. Stale and corrupt files
    /// are deleted best-effort so they are not re-parsed on every load.
    pub async fn load_cart(&self, cart_id: &str) -> Option<Cart> {
        let path = self.cart_path(cart_id)?;

        let bytes = tokio::fs::read(&path).await.ok()?;

        let cart: Cart = match serde_json::from_slice(&bytes) {
            Ok(cart) => cart,
            Err(err) => {
                tracing::warn!(cart_id, %err, "discarding corrupt stored cart");
                let _ = tokio::fs::remove_file(&path).await;
                return None;
            }
        };

        if cart.version != CART_VERSION {
            tracing::info!(
                cart_id,
                stored = cart.version,
                current = CART_VERSION,
                "discarding stored cart with stale schema version"
            );
            let _ = tokio::fs::remove_file(&path).await;
            return None;
        }

        Some(cart)
    }

    /// Erases the stored cart. Best effort; a missing file is not an error.
    pub async fn clear_cart(&self, cart_id: &str) {
        if let Some(path) = self.cart_path(cart_id) {
            let _ = tokio::fs::remove_file(&path).await;
        }
    }

    /// Maps a cart id to its file path, dropping any character that could
    /// escape the data directory. Ids with no usable characters are refused.
    fn cart_path(&self, cart_id: &str) -> Option<PathBuf> {
        let safe: String = cart_id
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();

        if safe.is_empty() {
            return None;
        }

        Some(self.data_dir.join(format!("cart-{}.json", safe)))
    }
}
