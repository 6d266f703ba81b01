//! Shopping cart types and the cart store contract.
//!
//! The cart store owns cart state. Callers read snapshots and submit
//! [`CartItemUpdate`] deltas; the store serializes writes and keeps at most one
//! line item per product.

mod memory;

pub use memory::MemoryCartStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use larkspur_core::{CustomerId, ProductId};

/// One cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product_id: ProductId,
    /// Always at least 1.
    pub quantity: u32,
    /// Hint for the UI to open the cart popover after this change.
    pub show_popover: bool,
}

/// Ordered cart contents. At most one line item per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    pub line_items: Vec<CartLineItem>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The line item for `product_id`, if present.
    #[must_use]
    pub fn line_for(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.line_items
            .iter()
            .find(|line| &line.product_id == product_id)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.line_items
            .iter()
            .fold(0u32, |total, line| total.saturating_add(line.quantity))
    }
}

/// A single quantity update for one product.
///
/// `quantity` is the target computed from a snapshot in which the line held
/// `base_quantity` units (0 when absent). The store applies the difference to
/// its current state, so updates computed from the same snapshot accumulate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemUpdate {
    pub product_id: ProductId,
    pub quantity: u32,
    pub show_popover: bool,
    #[serde(skip)]
    pub base_quantity: u32,
}

impl CartItemUpdate {
    /// Units this update adds on top of whatever the store currently holds.
    #[must_use]
    pub const fn delta(&self) -> u32 {
        self.quantity.saturating_sub(self.base_quantity)
    }
}

/// Errors raised by a cart store.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// Line quantities must be positive.
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity {
        product_id: ProductId,
        quantity: u32,
    },

    /// The backing store could not be reached.
    #[error("Cart store unavailable: {0}")]
    Unavailable(String),
}

/// Read/write access to customers' carts.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Current cart contents for a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    async fn snapshot(&self, customer: &CustomerId) -> Result<CartState, CartStoreError>;

    /// Apply one line-item update and return the resulting cart.
    ///
    /// The store adds [`CartItemUpdate::delta`] to the product's current
    /// quantity, inserting the line if needed, and serializes concurrent
    /// updates. A stale snapshot therefore never loses an increment.
    ///
    /// # Errors
    ///
    /// Returns an error if the update is invalid or the store is unavailable.
    async fn update_cart_item(
        &self,
        customer: &CustomerId,
        update: CartItemUpdate,
    ) -> Result<CartState, CartStoreError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: u32) -> CartLineItem {
        CartLineItem {
            product_id: ProductId::new(id),
            quantity,
            show_popover: false,
        }
    }

    #[test]
    fn test_line_for_finds_matching_product() {
        let cart = CartState {
            line_items: vec![line("1", 2), line("4821", 3)],
        };
        assert_eq!(cart.line_for(&ProductId::new("4821")).map(|l| l.quantity), Some(3));
        assert!(cart.line_for(&ProductId::new("9")).is_none());
    }

    #[test]
    fn test_delta_is_target_minus_base() {
        let update = CartItemUpdate {
            product_id: ProductId::new("4821"),
            quantity: 4,
            show_popover: true,
            base_quantity: 3,
        };
        assert_eq!(update.delta(), 1);

        let serialized = serde_json::to_value(&update).unwrap();
        assert!(serialized.get("base_quantity").is_none());
    }

    #[test]
    fn test_item_count() {
        let cart = CartState {
            line_items: vec![line("1", 2), line("2", 5)],
        };
        assert_eq!(cart.item_count(), 7);
        assert_eq!(CartState::empty().item_count(), 0);
    }
}
