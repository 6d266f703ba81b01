//! Product detail route handlers.
//!
//! Each request builds one [`ProductDetailView`], mounts it, and applies the
//! user action. Notifications raised along the way are merged into the
//! session's board; a redirect requested by the view wins over the body.
//! If the client disconnects, the handler future is dropped and the view is
//! torn down with it.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use larkspur_core::ProductSlug;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::{OptionalAuth, load_notifications, save_notifications};
use crate::models::CurrentCustomer;
use crate::navigation::NavigationRecorder;
use crate::notifications::{Notification, NotificationBoard, NotificationCenter};
use crate::product::{
    CartOutcome, CategoryDirectory, ProductDetailView, ViewContext, WishlistOutcome, wishlist,
};
use crate::state::AppState;

/// Per-request collaborators of a view.
struct RequestScope {
    initial: NotificationBoard,
    center: NotificationCenter,
    navigator: Arc<NavigationRecorder>,
}

impl RequestScope {
    async fn open(session: &Session) -> Result<Self> {
        let initial = load_notifications(session).await?;
        Ok(Self {
            center: NotificationCenter::from_board(initial.clone()),
            initial,
            navigator: Arc::new(NavigationRecorder::new()),
        })
    }

    async fn view(
        &self,
        state: &AppState,
        customer: Option<CurrentCustomer>,
        slug: String,
    ) -> ProductDetailView {
        let slug = ProductSlug::new(slug);
        let categories = if slug.product_id().is_some() {
            match state.catalog().categories().await {
                Ok(categories) => CategoryDirectory::from(categories),
                Err(e) => {
                    tracing::warn!(error = %e, "Category list unavailable, labels will be empty");
                    CategoryDirectory::empty()
                }
            }
        } else {
            CategoryDirectory::empty()
        };

        let ctx = ViewContext {
            catalog: Arc::clone(state.catalog()),
            categories: Arc::new(categories),
            notifier: Arc::new(self.center.clone()),
            navigator: self.navigator.clone(),
            carts: Arc::clone(state.carts()),
            session: customer,
        };
        ProductDetailView::new(ctx, slug)
    }

    /// Persist notifications and turn a requested redirect into a `303`.
    async fn finish(self, session: &Session, body: Response) -> Result<Response> {
        let board = self.center.snapshot();
        if board != self.initial {
            save_notifications(session, &board).await?;
        }

        Ok(match self.navigator.destination() {
            Some(route) => Redirect::to(route.path()).into_response(),
            None => body,
        })
    }
}

/// Product detail view model.
///
/// `204 No Content` when the slug carries no product id; `303` to the
/// catalog listing when the product cannot be loaded.
#[instrument(skip(state, session, customer))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(customer): OptionalAuth,
    Path(slug): Path<String>,
) -> Result<Response> {
    let scope = RequestScope::open(&session).await?;
    let mut view = scope.view(&state, customer, slug).await;

    view.mount().await;
    let body = match view.render() {
        Some(page) => Json(page).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };

    scope.finish(&session, body).await
}

/// Add one unit of the product to the signed-in customer's cart.
///
/// Signed-out visitors are redirected to the account page.
#[instrument(skip(state, session, customer))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(customer): OptionalAuth,
    Path(slug): Path<String>,
) -> Result<Response> {
    let scope = RequestScope::open(&session).await?;
    let mut view = scope.view(&state, customer, slug).await;

    view.mount().await;
    let body = if view.render().is_some() {
        let outcome = view.add_to_cart().await?;
        if let CartOutcome::Updated { update, .. } = &outcome {
            let quantity = update.quantity.to_string();
            add_breadcrumb(
                "cart",
                "Added to cart",
                Some(&[
                    ("product_id", update.product_id.as_str()),
                    ("quantity", quantity.as_str()),
                ]),
            );
        }
        Json(outcome).into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    };

    scope.finish(&session, body).await
}

/// Response body of a wishlist write.
#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub outcome: WishlistOutcome,
    pub notification: Option<Notification>,
}

/// Add the product to the customer's wishlist and return the terminal
/// notification.
#[instrument(skip(state, session, customer))]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(customer): OptionalAuth,
    Path(slug): Path<String>,
) -> Result<Response> {
    let scope = RequestScope::open(&session).await?;
    let mut view = scope.view(&state, customer, slug).await;

    view.mount().await;
    let body = if let Some(page) = view.render() {
        let key = wishlist::notification_key(&page.product.id);
        let outcome = view.add_to_wishlist().await?;
        Json(WishlistResponse {
            outcome,
            notification: scope.center.get(&key),
        })
        .into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    };

    scope.finish(&session, body).await
}
