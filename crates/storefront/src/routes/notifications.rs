//! Notification board route handlers.
//!
//! The board is per session: each browser sees only the notifications its
//! own requests raised.

use axum::{Json, extract::Path, http::StatusCode};
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::{load_notifications, save_notifications};
use crate::notifications::{Notification, NotificationBoard};

/// Every notification on the session's board, keyed.
pub async fn index(session: Session) -> Result<Json<NotificationBoard>> {
    Ok(Json(load_notifications(&session).await?))
}

/// The notification currently shown under `key`.
pub async fn show(session: Session, Path(key): Path<String>) -> Result<Json<Notification>> {
    let board = load_notifications(&session).await?;
    board
        .get(&key)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("notification {key}")))
}

/// Dismiss the notification under `key`.
pub async fn dismiss(session: Session, Path(key): Path<String>) -> Result<StatusCode> {
    let mut board = load_notifications(&session).await?;
    if board.dismiss(&key).is_none() {
        return Err(AppError::NotFound(format!("notification {key}")));
    }
    save_notifications(&session, &board).await?;
    Ok(StatusCode::NO_CONTENT)
}
