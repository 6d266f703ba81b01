//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with the in-memory store)
//! 5. Rate limiting on write routes (governor)

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, set_current_customer};
pub use rate_limit::{RateLimiterLayer, write_rate_limiter};
pub use request_id::request_id_middleware;
pub use session::{create_session_layer, load_notifications, save_notifications};
