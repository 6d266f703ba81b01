//! Product slug parsing.
//!
//! Product URLs carry a human-readable name and the catalog id in a single
//! path segment: `classic-leather-boots-p4821`. The id is everything after
//! the first `-p` separator.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A raw product slug taken from the route.
///
/// Parsing never fails: a slug without an id simply yields `None` from
/// [`ProductSlug::product_id`], which callers treat as "nothing to fetch".
///
/// ## Known ambiguity
///
/// Only the first `-p` is treated as the separator, so a slug such as
/// `top-pick-p12` yields the id `ick-p12`. Names containing `-p` are not
/// disambiguated.
///
/// ## Examples
///
/// ```
/// use larkspur_core::ProductSlug;
///
/// let slug = ProductSlug::new("classic-leather-boots-p4821");
/// assert_eq!(slug.product_id().unwrap().as_str(), "4821");
///
/// assert!(ProductSlug::new("classic-leather-boots").product_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductSlug(String);

impl ProductSlug {
    /// Separator between the name part and the id part.
    pub const SEPARATOR: &'static str = "-p";

    /// Wrap a raw slug.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// The raw slug string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id segment, if the slug carries one.
    ///
    /// Returns `None` when the separator is missing or nothing follows it.
    #[must_use]
    pub fn id_segment(&self) -> Option<&str> {
        self.0
            .split_once(Self::SEPARATOR)
            .map(|(_, id)| id)
            .filter(|id| !id.is_empty())
    }

    /// The product id encoded in the slug.
    #[must_use]
    pub fn product_id(&self) -> Option<ProductId> {
        self.id_segment().map(ProductId::from)
    }
}

impl fmt::Display for ProductSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductSlug {
    fn from(slug: &str) -> Self {
        Self::new(slug)
    }
}

impl From<String> for ProductSlug {
    fn from(slug: String) -> Self {
        Self(slug)
    }
}
