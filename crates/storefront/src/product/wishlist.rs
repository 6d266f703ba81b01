//! Wishlist writes with keyed status notifications.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use larkspur_core::{CustomerId, NotificationStatus, ProductId};

use crate::catalog::{CatalogError, CatalogService};
use crate::notifications::Notifier;

/// Notification key for wishlist writes on `product_id`.
///
/// Stable per product: writes on different products never share a key, and
/// a repeated write on one product replaces its previous status.
#[must_use]
pub fn notification_key(product_id: &ProductId) -> String {
    format!("add-wishlist-{product_id}")
}

/// Terminal result of a wishlist write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WishlistOutcome {
    Added,
    AlreadyPresent,
    Failed,
}

impl WishlistOutcome {
    const fn status(self) -> NotificationStatus {
        match self {
            Self::Added => NotificationStatus::Success,
            Self::AlreadyPresent | Self::Failed => NotificationStatus::Error,
        }
    }
}

/// Issues wishlist writes and reports their progress under a keyed
/// notification.
#[derive(Clone)]
pub struct WishlistNotifier {
    catalog: Arc<dyn CatalogService>,
    notifier: Arc<dyn Notifier>,
    customer: Option<CustomerId>,
}

impl WishlistNotifier {
    /// Create a notifier acting for `customer`.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        notifier: Arc<dyn Notifier>,
        customer: Option<CustomerId>,
    ) -> Self {
        Self {
            catalog,
            notifier,
            customer,
        }
    }

    /// Add a product to the wishlist.
    ///
    /// Shows a pending notification, makes one remote write, then replaces
    /// the notification with exactly one success or error message. No local
    /// wishlist state is kept.
    #[instrument(skip(self, product_name), fields(product_id = %product_id))]
    pub async fn add_to_wishlist(
        &self,
        product_id: &ProductId,
        product_name: &str,
    ) -> WishlistOutcome {
        let key = notification_key(product_id);

        self.notifier.show(
            &key,
            NotificationStatus::Pending,
            format!("Adding product \"{product_name}\" into Wishlist"),
        );

        let result = self
            .catalog
            .add_wishlist(product_id, self.customer.as_ref())
            .await;

        let (outcome, message) = match result {
            Ok(()) => (
                WishlistOutcome::Added,
                format!("Adding \"{product_name}\" to Wishlist Successfully!"),
            ),
            Err(CatalogError::Duplicate(_)) => (
                WishlistOutcome::AlreadyPresent,
                format!("\"{product_name}\" already exists in Wishlist"),
            ),
            Err(e) => {
                tracing::warn!(error = %e, "Wishlist write failed");
                (
                    WishlistOutcome::Failed,
                    format!("Could not add \"{product_name}\" to Wishlist"),
                )
            }
        };

        self.notifier.show(&key, outcome.status(), message);
        outcome
    }
}
