//! Session middleware configuration.
//!
//! Sessions live in the in-process `MemoryStore`. Besides the signed-in
//! customer, each session carries its own notification board so keyed
//! notifications survive the redirect that usually follows them.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::StorefrontConfig;
use crate::models::session_keys;
use crate::notifications::NotificationBoard;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "larkspur_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Load the session's notification board; empty if none was stored.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored board is
/// unreadable.
pub async fn load_notifications(
    session: &Session,
) -> Result<NotificationBoard, tower_sessions::session::Error> {
    Ok(session
        .get::<NotificationBoard>(session_keys::NOTIFICATIONS)
        .await?
        .unwrap_or_default())
}

/// Write the notification board back to the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_notifications(
    session: &Session,
    board: &NotificationBoard,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::NOTIFICATIONS, board).await
}
