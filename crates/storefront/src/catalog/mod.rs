//! Catalog service client.
//!
//! # Architecture
//!
//! - The catalog service is the source of truth for products, categories and
//!   wishlist membership - NO local copies beyond a short-lived cache
//! - Payloads are validated at this boundary (see `conversions`); a payload
//!   that does not match the expected shape is a [`CatalogError::Schema`]
//! - In-memory caching via `moka` for product and category reads (5 minute TTL)
//!
//! Product-detail logic depends on the [`CatalogService`] trait rather than
//! the HTTP client so it can be exercised against fakes.
//!
//! # Example
//!
//! ```rust,ignore
//! use larkspur_storefront::catalog::{CatalogService, HttpCatalogClient};
//!
//! let client = HttpCatalogClient::new(&config.catalog)?;
//! let product = client.product_detail(&ProductId::new("4821")).await?;
//! client.add_wishlist(&product.id, Some(&customer.id)).await?;
//! ```

mod cache;
mod client;
mod conversions;
pub mod types;

pub use client::HttpCatalogClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

use larkspur_core::{CustomerId, ProductId};

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Catalog returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The payload did not match the expected schema.
    #[error("Schema mismatch: {0}")]
    Schema(String),

    /// The product is already in the customer's wishlist.
    #[error("Product {0} is already in the wishlist")]
    Duplicate(ProductId),

    /// The configured base URL cannot carry path segments.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

impl CatalogError {
    /// Whether the error reports a product that does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Read and write operations the storefront needs from the catalog service.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Load the detail record for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist, the request fails, or
    /// the payload does not match the expected schema.
    async fn product_detail(&self, id: &ProductId) -> Result<ProductDetail, CatalogError>;

    /// Load every display category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is malformed.
    async fn categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// Record wishlist interest in a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Duplicate`] if the product is already in the
    /// wishlist, or another error if the request fails.
    async fn add_wishlist(
        &self,
        id: &ProductId,
        customer: Option<&CustomerId>,
    ) -> Result<(), CatalogError>;
}
