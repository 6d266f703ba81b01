//! Integration tests for the Larkspur storefront.
//!
//! The storefront is exercised end to end: requests go through the real
//! router, session layer, and `HttpCatalogClient`, which talks to a scripted
//! catalog API served by [`CatalogApi`] on an ephemeral local port.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p larkspur-integration-tests
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::{Next, from_fn},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower_sessions::Session;
use url::Url;

use larkspur_core::CustomerId;
use larkspur_storefront::cart::MemoryCartStore;
use larkspur_storefront::catalog::HttpCatalogClient;
use larkspur_storefront::config::{CatalogConfig, StorefrontConfig};
use larkspur_storefront::middleware::{create_session_layer, set_current_customer};
use larkspur_storefront::models::CurrentCustomer;
use larkspur_storefront::routes;
use larkspur_storefront::state::AppState;

/// Bearer token the storefront presents to the scripted catalog API.
pub const CATALOG_TOKEN: &str = "k9Z!q2Lm#84Rtx0P";

/// Request header the test sign-in middleware reads.
pub const SIGNED_IN_HEADER: &str = "x-signed-in-as";

/// The boots product as the catalog API returns it.
#[must_use]
pub fn boots_payload() -> Value {
    json!({
        "id": 4821,
        "name": "Classic Leather Boots",
        "images": [
            {"thumbnail_url": "https://cdn.larkspur.shop/boots-1.jpg"},
            {"thumbnail_url": "https://cdn.larkspur.shop/boots-2.jpg"}
        ],
        "price": "89.99",
        "real_price": "59.99",
        "short_description": "Full-grain leather, hand-stitched welt.",
        "review_count": 12,
        "rating_average": 4.5,
        "categories": [7]
    })
}

/// What the scripted catalog answers, and what it saw.
pub struct CatalogApi {
    product_status: StatusCode,
    product_body: Value,
    wishlist_status: StatusCode,
    detail_hits: AtomicUsize,
    category_hits: AtomicUsize,
    wishlist_hits: AtomicUsize,
    last_wishlist_headers: Mutex<Option<HeaderMap>>,
}

impl Default for CatalogApi {
    fn default() -> Self {
        Self {
            product_status: StatusCode::OK,
            product_body: json!({ "data": boots_payload() }),
            wishlist_status: StatusCode::CREATED,
            detail_hits: AtomicUsize::new(0),
            category_hits: AtomicUsize::new(0),
            wishlist_hits: AtomicUsize::new(0),
            last_wishlist_headers: Mutex::new(None),
        }
    }
}

impl CatalogApi {
    /// Answer product requests with `status` and `body`.
    #[must_use]
    pub fn with_product_response(mut self, status: StatusCode, body: Value) -> Self {
        self.product_status = status;
        self.product_body = body;
        self
    }

    /// Answer wishlist writes with `status`.
    #[must_use]
    pub const fn with_wishlist_status(mut self, status: StatusCode) -> Self {
        self.wishlist_status = status;
        self
    }

    pub fn detail_hits(&self) -> usize {
        self.detail_hits.load(Ordering::SeqCst)
    }

    pub fn category_hits(&self) -> usize {
        self.category_hits.load(Ordering::SeqCst)
    }

    pub fn wishlist_hits(&self) -> usize {
        self.wishlist_hits.load(Ordering::SeqCst)
    }

    /// Headers of the most recent wishlist write.
    pub fn last_wishlist_headers(&self) -> Option<HeaderMap> {
        self.last_wishlist_headers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Serve the API on an ephemeral port and return its base URL.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn spawn(self) -> (Arc<Self>, Url) {
        let api = Arc::new(self);
        let router = Router::new()
            .route("/api/product/{id}", get(product))
            .route("/api/categories", get(categories))
            .route("/api/user/wishlist/{id}", post(wishlist))
            .with_state(Arc::clone(&api));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind catalog API listener");
        let addr = listener
            .local_addr()
            .expect("Failed to read catalog API address");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                panic!("Catalog API stopped: {e}");
            }
        });

        let base_url =
            Url::parse(&format!("http://{addr}/api/")).expect("Failed to build catalog API URL");
        (api, base_url)
    }
}

async fn product(State(api): State<Arc<CatalogApi>>, Path(_id): Path<String>) -> Response {
    api.detail_hits.fetch_add(1, Ordering::SeqCst);
    (api.product_status, Json(api.product_body.clone())).into_response()
}

async fn categories(State(api): State<Arc<CatalogApi>>) -> Json<Value> {
    api.category_hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "data": [
            {"id": 7, "title": "Boots"},
            {"id": "8", "title": "Bags"}
        ]
    }))
}

async fn wishlist(
    State(api): State<Arc<CatalogApi>>,
    Path(_id): Path<String>,
    headers: HeaderMap,
) -> StatusCode {
    api.wishlist_hits.fetch_add(1, Ordering::SeqCst);
    *api
        .last_wishlist_headers
        .lock()
        .unwrap_or_else(PoisonError::into_inner) = Some(headers);
    api.wishlist_status
}

/// Catalog client configuration pointing at `base_url`.
#[must_use]
pub fn catalog_config(base_url: Url) -> CatalogConfig {
    CatalogConfig::new(base_url, SecretString::from(CATALOG_TOKEN))
}

/// HTTP catalog client for `base_url`.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn catalog_client(base_url: Url) -> HttpCatalogClient {
    HttpCatalogClient::new(&catalog_config(base_url)).expect("Failed to build catalog client")
}

/// Stand-in for the account service: signs in whoever [`SIGNED_IN_HEADER`]
/// names.
async fn sign_in(session: Session, request: Request, next: Next) -> Response {
    if let Some(id) = request
        .headers()
        .get(SIGNED_IN_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        let customer = CurrentCustomer {
            id: CustomerId::new(id),
        };
        if let Err(e) = set_current_customer(&session, &customer).await {
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    }
    next.run(request).await
}

/// The storefront router wired to the catalog API at `catalog_url`.
///
/// # Panics
///
/// Panics if the storefront state cannot be built.
#[must_use]
pub fn storefront(catalog_url: Url) -> Router {
    let config = StorefrontConfig::new(
        Url::parse("http://localhost:3000").expect("valid storefront URL"),
        catalog_config(catalog_url),
    );
    let session_layer = create_session_layer(&config);
    let state = AppState::with_services(
        config.clone(),
        Arc::new(catalog_client(config.catalog.base_url.clone())),
        Arc::new(MemoryCartStore::new()),
    );

    routes::routes()
        .layer(from_fn(sign_in))
        .layer(session_layer)
        .with_state(state)
}

/// Read a JSON response body.
///
/// # Panics
///
/// Panics if the body is not JSON.
pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

/// The `name=value` pair of the session cookie set by `response`.
#[must_use]
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookie| cookie.split(';').next())
        .map(str::to_string)
}
