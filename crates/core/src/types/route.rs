//! Navigation targets used by the storefront.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A route the storefront can redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Catalog listing.
    Catalog,
    /// Sign-in / account page.
    Account,
}

impl Route {
    /// Path for this route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Catalog => "/products",
            Self::Account => "/account",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
