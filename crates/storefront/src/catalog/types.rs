//! Domain types for the catalog service.
//!
//! These types provide a clean, validated API separate from the raw JSON
//! payloads the catalog service returns (see `conversions`).

use serde::{Deserialize, Serialize};

use larkspur_core::{CategoryId, Price, ProductId};

// =============================================================================
// Image Types
// =============================================================================

/// Product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Thumbnail-sized image URL.
    pub thumbnail_url: String,
}

// =============================================================================
// Product Types
// =============================================================================

/// A catalog item as shown on its detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Ordered image list. The first image is the primary image.
    pub images: Vec<ProductImage>,
    /// Origin (list) price.
    pub price: Price,
    /// Amount actually charged.
    pub real_price: Price,
    /// Short plain-text description.
    pub short_description: String,
    /// Number of reviews.
    pub review_count: u32,
    /// Average review rating, if the product has been rated.
    pub rating_average: Option<f64>,
    /// Category references, most specific first.
    pub categories: Vec<CategoryId>,
}

impl ProductDetail {
    /// The primary image, if the product has any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images.first()
    }
}

// =============================================================================
// Category Types
// =============================================================================

/// A display category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display title.
    pub title: String,
}
