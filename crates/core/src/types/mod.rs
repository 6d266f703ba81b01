//! Core types for Larkspur.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod route;
pub mod slug;
pub mod status;

pub use id::*;
pub use price::{CurrencyCode, Price, UnknownCurrency};
pub use route::Route;
pub use slug::ProductSlug;
pub use status::NotificationStatus;
