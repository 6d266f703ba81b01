//! Larkspur storefront library.
//!
//! Product detail core (slug resolution, fetch gating, price and category
//! presentation, cart reconciliation, wishlist notifications, view
//! lifecycle) behind a small axum surface. Exposed as a library so the
//! core can be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod notifications;
pub mod product;
pub mod routes;
pub mod state;

#[cfg(test)]
mod testing;
