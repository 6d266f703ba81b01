//! Cart route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::cart::CartState;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// The signed-in customer's cart snapshot.
#[instrument(skip(state, customer), fields(customer_id = %customer.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<CartState>> {
    let cart = state.carts().snapshot(&customer.id).await?;
    Ok(Json(cart))
}
