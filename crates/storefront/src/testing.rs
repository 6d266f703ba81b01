//! Test doubles shared by unit tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use larkspur_core::{CategoryId, CustomerId, Price, ProductId};

use crate::catalog::{CatalogError, CatalogService, Category, ProductDetail, ProductImage};

/// How the fake answers wishlist writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistBehavior {
    Accept,
    Duplicate,
    Unavailable,
}

/// Catalog service backed by fixed data.
pub struct FakeCatalog {
    products: HashMap<ProductId, ProductDetail>,
    categories: Vec<Category>,
    wishlist: WishlistBehavior,
    detail_gate: Option<Arc<Notify>>,
    wishlist_gate: Option<Arc<Notify>>,
    detail_calls: AtomicUsize,
    wishlist_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            products: HashMap::new(),
            categories: Vec::new(),
            wishlist: WishlistBehavior::Accept,
            detail_gate: None,
            wishlist_gate: None,
            detail_calls: AtomicUsize::new(0),
            wishlist_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_product(mut self, product: ProductDetail) -> Self {
        self.products.insert(product.id.clone(), product);
        self
    }

    pub fn with_category(mut self, id: &str, title: &str) -> Self {
        self.categories.push(Category {
            id: CategoryId::new(id),
            title: title.to_string(),
        });
        self
    }

    pub const fn with_wishlist(mut self, behavior: WishlistBehavior) -> Self {
        self.wishlist = behavior;
        self
    }

    /// Hold detail responses until the returned handle is notified.
    pub fn gate_detail(&mut self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.detail_gate = Some(Arc::clone(&gate));
        gate
    }

    /// Hold wishlist responses until the returned handle is notified.
    pub fn gate_wishlist(&mut self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.wishlist_gate = Some(Arc::clone(&gate));
        gate
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn wishlist_calls(&self) -> usize {
        self.wishlist_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn product_detail(&self, id: &ProductId) -> Result<ProductDetail, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.detail_gate {
            gate.notified().await;
        }
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("product {id}")))
    }

    async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.clone())
    }

    async fn add_wishlist(
        &self,
        id: &ProductId,
        _customer: Option<&CustomerId>,
    ) -> Result<(), CatalogError> {
        self.wishlist_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.wishlist_gate {
            gate.notified().await;
        }
        match self.wishlist {
            WishlistBehavior::Accept => Ok(()),
            WishlistBehavior::Duplicate => Err(CatalogError::Duplicate(id.clone())),
            WishlistBehavior::Unavailable => Err(CatalogError::Status {
                status: 503,
                body: "unavailable".to_string(),
            }),
        }
    }
}

/// The boots product used throughout the tests.
pub fn boots() -> ProductDetail {
    ProductDetail {
        id: ProductId::new("4821"),
        name: "Classic Leather Boots".to_string(),
        images: vec![
            ProductImage {
                thumbnail_url: "https://cdn.larkspur.shop/boots-1.jpg".to_string(),
            },
            ProductImage {
                thumbnail_url: "https://cdn.larkspur.shop/boots-2.jpg".to_string(),
            },
        ],
        price: Price::from_minor_units(8999, larkspur_core::CurrencyCode::USD),
        real_price: Price::from_minor_units(5999, larkspur_core::CurrencyCode::USD),
        short_description: "Full-grain leather, hand-stitched welt.".to_string(),
        review_count: 12,
        rating_average: Some(4.5),
        categories: vec![CategoryId::new("7")],
    }
}
