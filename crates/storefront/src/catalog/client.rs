//! HTTP client for the catalog service.
//!
//! Uses `reqwest` for HTTP and caches products and categories using `moka`
//! (5-minute TTL). Wishlist writes are never cached or retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use larkspur_core::{CurrencyCode, CustomerId, ProductId};

use super::cache::{CacheKey, CacheValue};
use super::conversions::{
    CategoryPayload, Envelope, ProductDetailPayload, convert_categories, convert_product_detail,
};
use super::types::{Category, ProductDetail};
use super::{CatalogError, CatalogService};
use crate::config::CatalogConfig;

/// Header carrying the signed-in customer for wishlist writes.
const CUSTOMER_HEADER: &str = "x-customer-id";

/// Maximum number of response body characters kept in errors and logs.
const BODY_PREVIEW_CHARS: usize = 200;

// =============================================================================
// HttpCatalogClient
// =============================================================================

/// Client for the catalog service's JSON API.
#[derive(Clone)]
pub struct HttpCatalogClient {
    inner: Arc<HttpCatalogClientInner>,
}

struct HttpCatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    access_token: String,
    currency: CurrencyCode,
    cache: Cache<CacheKey, CacheValue>,
}

impl HttpCatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(HttpCatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                access_token: config.api_token.expose_secret().to_string(),
                currency: config.currency,
                cache,
            }),
        })
    }

    /// Build an endpoint URL by appending path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Execute a GET request and decode the `data` envelope.
    ///
    /// Returns `Ok(None)` for a 404 or a `null` payload.
    async fn get_data<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, CatalogError> {
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(&self.inner.access_token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %preview(&response_text),
                "Catalog service returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: preview(&response_text),
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %preview(&response_text),
                "Catalog response did not match the expected schema"
            );
            CatalogError::Schema(e.to_string())
        })?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl CatalogService for HttpCatalogClient {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn product_detail(&self, id: &ProductId) -> Result<ProductDetail, CatalogError> {
        let cache_key = CacheKey::Product(id.clone());

        // Check cache
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = self.endpoint(&["product", id.as_str()])?;
        let payload = self
            .get_data::<ProductDetailPayload>(url)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("product {id}")))?;

        let product = convert_product_detail(payload, id, self.inner.currency)?;

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    #[instrument(skip(self))]
    async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories.to_vec());
        }

        let url = self.endpoint(&["categories"])?;
        let payload = self
            .get_data::<Vec<CategoryPayload>>(url)
            .await?
            .unwrap_or_default();
        let categories = convert_categories(payload);

        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone().into()),
            )
            .await;

        Ok(categories)
    }

    #[instrument(skip(self, customer), fields(product_id = %id))]
    async fn add_wishlist(
        &self,
        id: &ProductId,
        customer: Option<&CustomerId>,
    ) -> Result<(), CatalogError> {
        let url = self.endpoint(&["user", "wishlist", id.as_str()])?;

        let mut request = self
            .inner
            .client
            .post(url)
            .bearer_auth(&self.inner.access_token);
        if let Some(customer) = customer {
            request = request.header(CUSTOMER_HEADER, customer.as_str());
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        if matches!(status, StatusCode::BAD_REQUEST | StatusCode::CONFLICT) {
            debug!(status = %status, "Wishlist already contains product");
            return Err(CatalogError::Duplicate(id.clone()));
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            status = %status,
            body = %preview(&body),
            "Wishlist write failed"
        );
        Err(CatalogError::Status {
            status: status.as_u16(),
            body: preview(&body),
        })
    }
}

/// Truncate a response body for logs and error messages.
fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn client(base: &str) -> HttpCatalogClient {
        HttpCatalogClient::new(&CatalogConfig {
            base_url: Url::parse(base).unwrap(),
            api_token: SecretString::from("k9Z!q2Lm#84Rtx0P"),
            timeout: Duration::from_secs(5),
            currency: CurrencyCode::USD,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let client = client("https://catalog.example.com/api/v1/");
        let url = client.endpoint(&["product", "4821"]).unwrap();
        assert_eq!(url.as_str(), "https://catalog.example.com/api/v1/product/4821");
    }

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let client = client("https://catalog.example.com/api");
        let url = client.endpoint(&["categories"]).unwrap();
        assert_eq!(url.as_str(), "https://catalog.example.com/api/categories");
    }

    #[test]
    fn test_endpoint_escapes_id_segment() {
        let client = client("https://catalog.example.com/");
        let url = client.endpoint(&["product", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "https://catalog.example.com/product/a%2Fb");
    }

    #[test]
    fn test_preview_truncates() {
        let body = "x".repeat(500);
        assert_eq!(preview(&body).len(), BODY_PREVIEW_CHARS);
    }
}
