//! Catalog payload schema and conversion into domain types.
//!
//! The catalog service returns loosely typed JSON: ids may be numbers or
//! strings, and `categories` may be a single reference or a list. Payloads are
//! validated here so nothing downstream handles a half-formed product.

use rust_decimal::Decimal;
use serde::Deserialize;

use larkspur_core::{CategoryId, CurrencyCode, Price, ProductId};

use super::CatalogError;
use super::types::{Category, ProductDetail, ProductImage};

/// Response envelope used by every catalog endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    pub data: Option<T>,
}

/// An id that may arrive as a JSON string or number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum RawId {
    Text(String),
    Number(u64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// One reference or a list of references.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ImagePayload {
    pub thumbnail_url: String,
}

/// Raw product detail payload.
#[derive(Debug, Deserialize)]
pub(super) struct ProductDetailPayload {
    pub id: RawId,
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImagePayload>,
    pub price: Decimal,
    pub real_price: Decimal,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub rating_average: Option<f64>,
    #[serde(default)]
    pub categories: Option<OneOrMany<RawId>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoryPayload {
    pub id: RawId,
    pub title: String,
}

/// Validate a product payload and convert it into a [`ProductDetail`].
///
/// `requested` is the id the caller asked for; a payload describing a
/// different product is rejected.
pub(super) fn convert_product_detail(
    payload: ProductDetailPayload,
    requested: &ProductId,
    currency: CurrencyCode,
) -> Result<ProductDetail, CatalogError> {
    let id = ProductId::new(payload.id.into_string());
    if &id != requested {
        return Err(CatalogError::Schema(format!(
            "requested product {requested} but received {id}"
        )));
    }

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(CatalogError::Schema(format!("product {id} has no name")));
    }

    if payload.price.is_sign_negative() || payload.real_price.is_sign_negative() {
        return Err(CatalogError::Schema(format!(
            "product {id} has a negative price"
        )));
    }

    let images = payload
        .images
        .into_iter()
        .map(|image| ProductImage {
            thumbnail_url: image.thumbnail_url,
        })
        .collect();

    let categories = payload
        .categories
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .map(|raw| CategoryId::new(raw.into_string()))
        .collect();

    Ok(ProductDetail {
        id,
        name,
        images,
        price: Price::new(payload.price, currency),
        real_price: Price::new(payload.real_price, currency),
        short_description: payload.short_description.unwrap_or_default(),
        review_count: payload.review_count.unwrap_or(0),
        rating_average: payload.rating_average,
        categories,
    })
}

/// Convert a category payload list.
pub(super) fn convert_categories(payload: Vec<CategoryPayload>) -> Vec<Category> {
    payload
        .into_iter()
        .map(|category| Category {
            id: CategoryId::new(category.id.into_string()),
            title: category.title,
        })
        .collect()
}
