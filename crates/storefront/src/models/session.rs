//! Session-related types.
//!
//! Types stored in the session for authentication and notification state.

use serde::{Deserialize, Serialize};

use larkspur_core::CustomerId;

/// Session-stored customer identity.
///
/// Written by the account service when the customer signs in; the
/// storefront only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentCustomer {
    /// Customer ID in the commerce backend.
    pub id: CustomerId,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current signed-in customer.
    pub const CURRENT_CUSTOMER: &str = "current_customer";

    /// Key for the customer's keyed notification board.
    pub const NOTIFICATIONS: &str = "notifications";
}
