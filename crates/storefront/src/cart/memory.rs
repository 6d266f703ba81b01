//! In-process cart store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::instrument;

use larkspur_core::CustomerId;

use super::{CartItemUpdate, CartLineItem, CartState, CartStore, CartStoreError};

/// Cart store that keeps every customer's cart in memory.
///
/// All writes go through one async mutex, so updates are applied one at a
/// time against the authoritative state.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    carts: Mutex<HashMap<CustomerId, CartState>>,
}

impl MemoryCartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn snapshot(&self, customer: &CustomerId) -> Result<CartState, CartStoreError> {
        Ok(self
            .carts
            .lock()
            .await
            .get(customer)
            .cloned()
            .unwrap_or_default())
    }

    #[instrument(skip(self, update), fields(product_id = %update.product_id))]
    async fn update_cart_item(
        &self,
        customer: &CustomerId,
        update: CartItemUpdate,
    ) -> Result<CartState, CartStoreError> {
        if update.quantity == 0 {
            return Err(CartStoreError::InvalidQuantity {
                product_id: update.product_id,
                quantity: update.quantity,
            });
        }

        let mut carts = self.carts.lock().await;
        let cart = carts.entry(customer.clone()).or_default();

        // Only the most recent change keeps the popover hint.
        for line in &mut cart.line_items {
            line.show_popover = false;
        }

        let delta = update.delta();
        match cart
            .line_items
            .iter_mut()
            .find(|line| line.product_id == update.product_id)
        {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(delta);
                line.show_popover = update.show_popover;
            }
            None => cart.line_items.push(CartLineItem {
                product_id: update.product_id,
                quantity: delta.max(1),
                show_popover: update.show_popover,
            }),
        }

        tracing::debug!(item_count = cart.item_count(), "Cart updated");
        Ok(cart.clone())
    }
}
