//! Larkspur Core - Shared types library.
//!
//! This crate provides common types used by the Larkspur storefront and its
//! test harness:
//! - `storefront` - Product detail service and HTTP surface
//! - `integration-tests` - Black-box scenarios against fake collaborators
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, product slugs, prices, routes and notification statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
