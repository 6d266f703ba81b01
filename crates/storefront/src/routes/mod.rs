//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Liveness check
//!
//! # Product detail
//! GET  /products/{slug}              - Product page view model (JSON)
//! POST /products/{slug}/cart         - Add one unit to the cart
//! POST /products/{slug}/wishlist     - Add to the wishlist
//!
//! # Cart (requires auth)
//! GET  /cart                         - Cart snapshot
//!
//! # Notifications
//! GET  /notifications                - Session notification board
//! GET    /notifications/{key}        - One notification
//! DELETE /notifications/{key}        - Dismiss a notification
//! ```

pub mod cart;
pub mod notifications;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::RateLimiterLayer;
use crate::state::AppState;

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Read-only routes.
pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/products/{slug}", get(products::show))
        .route("/cart", get(cart::show))
        .route("/notifications", get(notifications::index))
        .route(
            "/notifications/{key}",
            get(notifications::show).delete(notifications::dismiss),
        )
}

/// Routes that write to the cart store or the catalog service.
pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/products/{slug}/cart", post(products::add_to_cart))
        .route("/products/{slug}/wishlist", post(products::add_to_wishlist))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    read_routes().merge(write_routes())
}

/// All routes, with `limiter` applied to the write routes.
pub fn rate_limited_routes(limiter: RateLimiterLayer) -> Router<AppState> {
    read_routes().merge(write_routes().layer(limiter))
}
