//! Product detail fetching, gated on a resolvable product id.

use tracing::instrument;

use larkspur_core::{NotificationStatus, ProductId, ProductSlug, Route};

use crate::catalog::{CatalogError, CatalogService, ProductDetail};
use crate::navigation::Navigator;
use crate::notifications::Notifier;

/// Message shown when a product page cannot be loaded.
pub const PRODUCT_MISSING_MESSAGE: &str = "Product does not exist!";

/// Whether a fetch may be attempted for a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchGate {
    /// The slug carries no id; nothing is fetched and nothing is reported.
    Disabled,
    /// Fetch this product.
    Enabled(ProductId),
}

impl FetchGate {
    /// Gate the fetch on the id encoded in `slug`.
    #[must_use]
    pub fn for_slug(slug: &ProductSlug) -> Self {
        slug.product_id().map_or(Self::Disabled, Self::Enabled)
    }
}

/// Notification key for a product page load failure.
#[must_use]
pub fn failure_key(id: &ProductId) -> String {
    format!("product-detail-{id}")
}

/// Load a product's detail record. Exactly one remote call, no retry.
///
/// # Errors
///
/// Returns the catalog error unchanged; see [`report_failure`] for the
/// user-facing effects.
#[instrument(skip(catalog), fields(product_id = %id))]
pub async fn fetch(
    catalog: &dyn CatalogService,
    id: &ProductId,
) -> Result<ProductDetail, CatalogError> {
    catalog.product_detail(id).await
}

/// Apply the user-facing effects of a failed fetch: one error notification
/// and one redirect to the catalog listing.
pub fn report_failure(
    notifier: &dyn Notifier,
    navigator: &dyn Navigator,
    id: &ProductId,
    error: &CatalogError,
) {
    if error.is_not_found() {
        tracing::info!(product_id = %id, "Product not found");
    } else {
        tracing::warn!(product_id = %id, error = %error, "Product detail fetch failed");
    }

    notifier.show(
        &failure_key(id),
        NotificationStatus::Error,
        PRODUCT_MISSING_MESSAGE.to_string(),
    );
    navigator.redirect(Route::Catalog);
}
