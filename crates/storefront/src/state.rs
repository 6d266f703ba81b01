//! Application state shared across handlers.

use std::sync::Arc;

use crate::cart::{CartStore, MemoryCartStore};
use crate::catalog::{CatalogError, CatalogService, HttpCatalogClient};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog service, the cart store, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<dyn CatalogService>,
    carts: Arc<dyn CartStore>,
}

impl AppState {
    /// Create the production state: HTTP catalog client and in-memory carts.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = HttpCatalogClient::new(&config.catalog)?;
        Ok(Self::with_services(
            config,
            Arc::new(catalog),
            Arc::new(MemoryCartStore::new()),
        ))
    }

    /// Create state around the given services.
    #[must_use]
    pub fn with_services(
        config: StorefrontConfig,
        catalog: Arc<dyn CatalogService>,
        carts: Arc<dyn CartStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the catalog service.
    #[must_use]
    pub fn catalog(&self) -> &Arc<dyn CatalogService> {
        &self.inner.catalog
    }

    /// Get the cart store.
    #[must_use]
    pub fn carts(&self) -> &Arc<dyn CartStore> {
        &self.inner.carts
    }
}
