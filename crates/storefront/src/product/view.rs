//! Product detail view lifecycle.
//!
//! A [`ProductDetailView`] is created per page visit. `mount` resolves the
//! slug and drives the fetch; user actions (cart, wishlist, gallery) act on
//! the loaded product. Every remote call is raced against the view's
//! teardown signal so a response that settles after teardown applies no
//! notification, redirect, or state change.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::instrument;

use larkspur_core::ProductSlug;

use super::cart::{self as reconciler, CartOutcome};
use super::category::{self, CategoryLookup};
use super::fetcher::{self, FetchGate};
use super::gallery::GalleryController;
use super::pricing::{PricePresentation, PriceView};
use super::wishlist::{WishlistNotifier, WishlistOutcome};
use crate::cart::{CartStore, CartStoreError};
use crate::catalog::{CatalogService, Category, ProductDetail};
use crate::models::CurrentCustomer;
use crate::navigation::Navigator;
use crate::notifications::Notifier;

/// Collaborators a view talks to.
#[derive(Clone)]
pub struct ViewContext {
    pub catalog: Arc<dyn CatalogService>,
    pub categories: Arc<dyn CategoryLookup>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub carts: Arc<dyn CartStore>,
    pub session: Option<CurrentCustomer>,
}

/// Everything the page shows once the product has loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
    pub product: ProductDetail,
    pub price: PriceView,
    pub category: Option<Category>,
    pub category_label: String,
}

impl ProductPage {
    /// Derive the page from a fetched product.
    #[must_use]
    pub fn build(product: ProductDetail, categories: &dyn CategoryLookup) -> Self {
        let presentation = PricePresentation::present(product.price, product.real_price);
        let category = category::resolve(categories, Some(&product.categories));
        let category_label = category::label(category.as_ref()).to_string();

        Self {
            price: PriceView::from(&presentation),
            product,
            category,
            category_label,
        }
    }
}

/// Where the view is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Not mounted yet.
    Idle,
    /// The slug carries no product id; nothing was fetched.
    Disabled,
    /// Fetch in flight; nothing renders.
    Loading,
    Ready(Box<ProductPage>),
    /// Fetch failed; the user was notified and redirected.
    Failed,
    TornDown,
}

/// Errors from user actions on a view.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("product is not loaded")]
    NotReady,

    #[error("view was torn down")]
    TornDown,

    #[error(transparent)]
    Cart(#[from] CartStoreError),
}

/// Clonable handle that tears a view down from outside, e.g. when the
/// client goes away.
#[derive(Clone)]
pub struct TeardownHandle {
    signal: Arc<watch::Sender<bool>>,
}

impl TeardownHandle {
    pub fn teardown(&self) {
        self.signal.send_replace(true);
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        *self.signal.borrow()
    }
}

/// Teardown signal owned by a view.
struct Lifecycle {
    signal: Arc<watch::Sender<bool>>,
}

impl Lifecycle {
    fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            signal: Arc::new(signal),
        }
    }

    fn handle(&self) -> TeardownHandle {
        TeardownHandle {
            signal: Arc::clone(&self.signal),
        }
    }

    fn is_live(&self) -> bool {
        !*self.signal.borrow()
    }

    fn teardown(&self) {
        self.signal.send_replace(true);
    }

    /// Drive `fut` unless the view is torn down first.
    ///
    /// Returns `None` when teardown wins the race or happened while `fut`
    /// was settling; the caller must then apply no effects.
    async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if !self.is_live() {
            return None;
        }

        let output = tokio::select! {
            biased;
            () = torn_down(self.signal.subscribe()) => None,
            output = fut => Some(output),
        };

        output.filter(|_| self.is_live())
    }
}

async fn torn_down(mut rx: watch::Receiver<bool>) {
    loop {
        let torn = *rx.borrow_and_update();
        if torn || rx.changed().await.is_err() {
            return;
        }
    }
}

/// One visit to a product detail page.
pub struct ProductDetailView {
    ctx: ViewContext,
    slug: ProductSlug,
    state: ViewState,
    gallery: GalleryController,
    lifecycle: Lifecycle,
}

impl ProductDetailView {
    #[must_use]
    pub fn new(ctx: ViewContext, slug: ProductSlug) -> Self {
        Self {
            ctx,
            slug,
            state: ViewState::Idle,
            gallery: GalleryController::new(),
            lifecycle: Lifecycle::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub const fn slug(&self) -> &ProductSlug {
        &self.slug
    }

    /// Resolve the slug and fetch the product.
    ///
    /// A slug without an id leaves the view `Disabled` with no remote call
    /// and no notification. A failed fetch reports once and leaves the view
    /// `Failed`.
    #[instrument(skip(self), fields(slug = %self.slug))]
    pub async fn mount(&mut self) -> &ViewState {
        if !self.lifecycle.is_live() {
            self.state = ViewState::TornDown;
            return &self.state;
        }

        let FetchGate::Enabled(id) = FetchGate::for_slug(&self.slug) else {
            tracing::debug!("Slug has no product id, fetch disabled");
            self.state = ViewState::Disabled;
            return &self.state;
        };

        self.state = ViewState::Loading;
        let result = self
            .lifecycle
            .run(fetcher::fetch(self.ctx.catalog.as_ref(), &id))
            .await;

        self.state = match result {
            None => {
                tracing::debug!("View torn down before the product settled");
                ViewState::TornDown
            }
            Some(Ok(product)) => ViewState::Ready(Box::new(ProductPage::build(
                product,
                self.ctx.categories.as_ref(),
            ))),
            Some(Err(e)) => {
                fetcher::report_failure(
                    self.ctx.notifier.as_ref(),
                    self.ctx.navigator.as_ref(),
                    &id,
                    &e,
                );
                ViewState::Failed
            }
        };
        &self.state
    }

    /// The page, once the product has loaded.
    #[must_use]
    pub fn render(&self) -> Option<&ProductPage> {
        match &self.state {
            ViewState::Ready(page) => Some(page),
            _ => None,
        }
    }

    fn ready_page(&self) -> Result<&ProductPage, ViewError> {
        match &self.state {
            ViewState::Ready(page) => Ok(page),
            ViewState::TornDown => Err(ViewError::TornDown),
            _ => Err(ViewError::NotReady),
        }
    }

    /// Add one unit of the loaded product to the customer's cart.
    ///
    /// # Errors
    ///
    /// `NotReady` before the product loads, `TornDown` if the view goes
    /// away first, or the cart store's error.
    pub async fn add_to_cart(&self) -> Result<CartOutcome, ViewError> {
        let product_id = self.ready_page()?.product.id.clone();

        let outcome = self
            .lifecycle
            .run(reconciler::add_or_increment(
                &self.ctx.session,
                self.ctx.carts.as_ref(),
                self.ctx.navigator.as_ref(),
                &product_id,
            ))
            .await
            .ok_or(ViewError::TornDown)?;

        Ok(outcome?)
    }

    /// Add the loaded product to the customer's wishlist.
    ///
    /// # Errors
    ///
    /// `NotReady` before the product loads, `TornDown` if the view goes
    /// away first. Remote failures are reported through the notifier and
    /// the returned outcome.
    pub async fn add_to_wishlist(&self) -> Result<WishlistOutcome, ViewError> {
        let product = &self.ready_page()?.product;

        let wishlist = WishlistNotifier::new(
            Arc::clone(&self.ctx.catalog),
            Arc::clone(&self.ctx.notifier),
            self.ctx.session.as_ref().map(|customer| customer.id.clone()),
        );

        self.lifecycle
            .run(wishlist.add_to_wishlist(&product.id, &product.name))
            .await
            .ok_or(ViewError::TornDown)
    }

    #[must_use]
    pub const fn gallery(&self) -> GalleryController {
        self.gallery
    }

    pub fn open_gallery(&mut self) {
        if self.lifecycle.is_live() {
            self.gallery.open();
        }
    }

    pub fn close_gallery(&mut self) {
        if self.lifecycle.is_live() {
            self.gallery.close();
        }
    }

    pub fn toggle_gallery(&mut self) {
        if self.lifecycle.is_live() {
            self.gallery.toggle();
        }
    }

    pub fn set_gallery_visible(&mut self, visible: bool) {
        if self.lifecycle.is_live() {
            self.gallery.set_visible(visible);
        }
    }

    #[must_use]
    pub fn teardown_handle(&self) -> TeardownHandle {
        self.lifecycle.handle()
    }

    /// Stop the view. In-flight calls settle without effect.
    pub fn teardown(&mut self) {
        self.lifecycle.teardown();
        self.state = ViewState::TornDown;
    }
}

impl Drop for ProductDetailView {
    fn drop(&mut self) {
        self.lifecycle.teardown();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use larkspur_core::{CategoryId, CustomerId, NotificationStatus, ProductId, Route};

    use super::*;
    use crate::cart::MemoryCartStore;
    use crate::navigation::NavigationRecorder;
    use crate::notifications::NotificationCenter;
    use crate::product::category::CategoryDirectory;
    use crate::testing::{FakeCatalog, WishlistBehavior, boots};

    struct Harness {
        catalog: Arc<FakeCatalog>,
        center: NotificationCenter,
        navigator: Arc<NavigationRecorder>,
        carts: Arc<MemoryCartStore>,
    }

    impl Harness {
        fn new(catalog: FakeCatalog) -> Self {
            Self {
                catalog: Arc::new(catalog),
                center: NotificationCenter::new(),
                navigator: Arc::new(NavigationRecorder::new()),
                carts: Arc::new(MemoryCartStore::new()),
            }
        }

        fn view(&self, slug: &str, signed_in: bool) -> ProductDetailView {
            let categories = CategoryDirectory::from(vec![Category {
                id: CategoryId::new("7"),
                title: "Boots".to_string(),
            }]);
            let ctx = ViewContext {
                catalog: Arc::clone(&self.catalog) as Arc<dyn CatalogService>,
                categories: Arc::new(categories),
                notifier: Arc::new(self.center.clone()),
                navigator: Arc::clone(&self.navigator) as Arc<dyn Navigator>,
                carts: Arc::clone(&self.carts) as Arc<dyn CartStore>,
                session: signed_in.then(|| CurrentCustomer {
                    id: CustomerId::new("c1"),
                }),
            };
            ProductDetailView::new(ctx, ProductSlug::new(slug))
        }
    }

    #[tokio::test]
    async fn test_mount_renders_discounted_page() {
        let harness = Harness::new(FakeCatalog::new().with_product(boots()));
        let mut view = harness.view("classic-leather-boots-p4821", true);

        assert!(matches!(view.mount().await, ViewState::Ready(_)));

        let page = view.render().unwrap();
        assert_eq!(page.product.name, "Classic Leather Boots");
        assert_eq!(page.price.active, "$59.99");
        assert_eq!(page.price.struck_through.as_deref(), Some("$89.99"));
        assert_eq!(page.price.discount_percent, Some(33));
        assert_eq!(page.category_label, "Boots");
        assert_eq!(harness.catalog.detail_calls(), 1);
        assert!(harness.center.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_slug_without_id_is_disabled() {
        let harness = Harness::new(FakeCatalog::new().with_product(boots()));
        let mut view = harness.view("classic-leather-boots", true);

        assert_eq!(view.mount().await, &ViewState::Disabled);
        assert!(view.render().is_none());
        assert_eq!(harness.catalog.detail_calls(), 0);
        assert!(harness.center.snapshot().is_empty());
        assert!(harness.navigator.history().is_empty());
    }

    #[tokio::test]
    async fn test_missing_product_fails_once() {
        let harness = Harness::new(FakeCatalog::new());
        let mut view = harness.view("ghost-p404", true);

        assert_eq!(view.mount().await, &ViewState::Failed);
        assert!(view.render().is_none());

        let board = harness.center.snapshot();
        assert_eq!(board.len(), 1);
        let notification = board.get("product-detail-404").unwrap();
        assert_eq!(notification.status, NotificationStatus::Error);
        assert_eq!(notification.message, fetcher::PRODUCT_MISSING_MESSAGE);
        assert_eq!(harness.navigator.history(), vec![Route::Catalog]);
    }

    #[tokio::test]
    async fn test_teardown_before_settle_applies_no_effects() {
        let mut catalog = FakeCatalog::new();
        let gate = catalog.gate_detail();
        let harness = Harness::new(catalog);
        let mut view = harness.view("ghost-p404", true);
        let handle = view.teardown_handle();

        tokio::join!(
            async {
                view.mount().await;
            },
            async {
                tokio::task::yield_now().await;
                handle.teardown();
                gate.notify_one();
            }
        );

        assert_eq!(view.state(), &ViewState::TornDown);
        assert!(handle.is_torn_down());
        assert!(harness.center.snapshot().is_empty());
        assert!(harness.navigator.history().is_empty());
    }

    #[tokio::test]
    async fn test_mount_after_teardown_does_not_fetch() {
        let harness = Harness::new(FakeCatalog::new().with_product(boots()));
        let mut view = harness.view("classic-leather-boots-p4821", true);

        view.teardown();
        assert_eq!(view.mount().await, &ViewState::TornDown);
        assert_eq!(harness.catalog.detail_calls(), 0);
    }

    #[tokio::test]
    async fn test_add_to_cart_before_ready() {
        let harness = Harness::new(FakeCatalog::new().with_product(boots()));
        let view = harness.view("classic-leather-boots-p4821", true);

        assert!(matches!(view.add_to_cart().await, Err(ViewError::NotReady)));
    }

    #[tokio::test]
    async fn test_add_to_cart_signed_out_redirects() {
        let harness = Harness::new(FakeCatalog::new().with_product(boots()));
        let mut view = harness.view("classic-leather-boots-p4821", false);
        view.mount().await;

        let outcome = view.add_to_cart().await.unwrap();

        assert_eq!(outcome, CartOutcome::RedirectedToAccount);
        assert_eq!(harness.navigator.destination(), Some(Route::Account));
    }

    #[tokio::test]
    async fn test_add_to_cart_twice_increments() {
        let harness = Harness::new(FakeCatalog::new().with_product(boots()));
        let mut view = harness.view("classic-leather-boots-p4821", true);
        view.mount().await;

        view.add_to_cart().await.unwrap();
        let outcome = view.add_to_cart().await.unwrap();

        let CartOutcome::Updated { update, cart } = outcome else {
            panic!("expected an update");
        };
        assert_eq!(update.quantity, 2);
        assert!(update.show_popover);
        assert_eq!(cart.line_items.len(), 1);
        assert_eq!(
            cart.line_for(&ProductId::new("4821")).map(|line| line.quantity),
            Some(2)
        );
    }

    #[tokio::test]
    async fn test_add_to_wishlist_reports_success() {
        let harness = Harness::new(FakeCatalog::new().with_product(boots()));
        let mut view = harness.view("classic-leather-boots-p4821", true);
        view.mount().await;

        let outcome = view.add_to_wishlist().await.unwrap();

        assert_eq!(outcome, WishlistOutcome::Added);
        let notification = harness.center.get("add-wishlist-4821").unwrap();
        assert_eq!(notification.status, NotificationStatus::Success);
    }

    #[tokio::test]
    async fn test_wishlist_teardown_mid_flight_leaves_pending() {
        let mut catalog = FakeCatalog::new()
            .with_product(boots())
            .with_wishlist(WishlistBehavior::Duplicate);
        let gate = catalog.gate_wishlist();
        let harness = Harness::new(catalog);
        let mut view = harness.view("classic-leather-boots-p4821", true);
        view.mount().await;
        let handle = view.teardown_handle();

        let (outcome, ()) = tokio::join!(view.add_to_wishlist(), async {
            tokio::task::yield_now().await;
            handle.teardown();
            gate.notify_one();
        });

        assert!(matches!(outcome, Err(ViewError::TornDown)));
        let notification = harness.center.get("add-wishlist-4821").unwrap();
        assert_eq!(notification.status, NotificationStatus::Pending);
    }

    #[tokio::test]
    async fn test_gallery_toggles_before_load() {
        let harness = Harness::new(FakeCatalog::new());
        let mut view = harness.view("classic-leather-boots-p4821", true);

        view.open_gallery();
        assert!(view.gallery().is_open());
        view.set_gallery_visible(false);
        assert!(!view.gallery().is_open());
        view.toggle_gallery();
        assert!(view.gallery().is_open());
        view.close_gallery();
        assert!(!view.gallery().is_open());
    }

    #[tokio::test]
    async fn test_drop_signals_teardown() {
        let harness = Harness::new(FakeCatalog::new());
        let view = harness.view("classic-leather-boots-p4821", true);
        let handle = view.teardown_handle();

        drop(view);
        assert!(handle.is_torn_down());
    }
}
