//! Add-to-cart reconciliation.
//!
//! Computes the single line-item update for an "add to cart" click from the
//! cart snapshot available at call time. Merging and ordering concurrent
//! updates is the cart store's job.

use serde::Serialize;
use tracing::instrument;

use larkspur_core::{CustomerId, ProductId, Route};

use crate::cart::{CartItemUpdate, CartState, CartStore, CartStoreError};
use crate::models::CurrentCustomer;
use crate::navigation::Navigator;

/// Read-only view of the signed-in customer.
pub trait SessionReader: Send + Sync {
    /// The signed-in customer's id, if any.
    fn customer_id(&self) -> Option<&CustomerId>;
}

impl SessionReader for Option<CurrentCustomer> {
    fn customer_id(&self) -> Option<&CustomerId> {
        self.as_ref().map(|customer| &customer.id)
    }
}

impl SessionReader for CurrentCustomer {
    fn customer_id(&self) -> Option<&CustomerId> {
        Some(&self.id)
    }
}

/// Result of an add-to-cart click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CartOutcome {
    /// No customer was signed in; the user was sent to the account page.
    RedirectedToAccount,
    /// One update was sent to the cart store.
    Updated {
        update: CartItemUpdate,
        cart: CartState,
    },
}

/// The update that adds one more unit of `product_id` to `snapshot`.
#[must_use]
pub fn next_line_item(snapshot: &CartState, product_id: &ProductId) -> CartItemUpdate {
    let base_quantity = snapshot.line_for(product_id).map_or(0, |line| line.quantity);

    CartItemUpdate {
        product_id: product_id.clone(),
        quantity: base_quantity.saturating_add(1),
        show_popover: true,
        base_quantity,
    }
}

/// Add one unit of `product_id` to the signed-in customer's cart.
///
/// Signed-out users are redirected to the account page; no cart read or
/// write happens in that case.
///
/// # Errors
///
/// Returns an error if the cart store fails to read or apply the update.
#[instrument(skip(session, store, navigator), fields(product_id = %product_id))]
pub async fn add_or_increment(
    session: &dyn SessionReader,
    store: &dyn CartStore,
    navigator: &dyn Navigator,
    product_id: &ProductId,
) -> Result<CartOutcome, CartStoreError> {
    let Some(customer) = session.customer_id() else {
        tracing::debug!("Add to cart without a session, redirecting to account");
        navigator.redirect(Route::Account);
        return Ok(CartOutcome::RedirectedToAccount);
    };

    let snapshot = store.snapshot(customer).await?;
    let update = next_line_item(&snapshot, product_id);
    tracing::info!(quantity = update.quantity, "Updating cart line");

    let cart = store.update_cart_item(customer, update.clone()).await?;
    Ok(CartOutcome::Updated { update, cart })
}
