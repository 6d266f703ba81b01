//! Cache types for catalog responses.

use std::sync::Arc;

use larkspur_core::ProductId;

use super::types::{Category, ProductDetail};

/// Cache key for products and categories.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Categories,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<ProductDetail>),
    Categories(Arc<[Category]>),
}
