//! Product detail page core.
//!
//! The non-visual logic behind a product page: resolving and fetching the
//! product, presenting its price and category, reconciling cart updates,
//! reporting wishlist writes, and the view lifecycle that ties them together.

pub mod cart;
pub mod category;
pub mod fetcher;
pub mod gallery;
pub mod pricing;
pub mod view;
pub mod wishlist;

pub use cart::{CartOutcome, SessionReader, add_or_increment};
pub use category::{CategoryDirectory, CategoryLookup};
pub use fetcher::{FetchGate, PRODUCT_MISSING_MESSAGE};
pub use gallery::GalleryController;
pub use pricing::{PricePresentation, PriceView};
pub use view::{ProductDetailView, ProductPage, TeardownHandle, ViewContext, ViewError, ViewState};
pub use wishlist::{WishlistNotifier, WishlistOutcome};
