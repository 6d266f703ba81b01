//! Keyed user notifications.
//!
//! A notification key (e.g. `add-wishlist-4821`) binds a sequence of status
//! messages into one replaceable timeline: showing a notification under an
//! existing key replaces it rather than stacking a second one.
//!
//! [`NotificationBoard`] is the plain state (key -> current notification) and
//! its transition function. [`NotificationCenter`] shares a board between the
//! code that raises notifications and the code that renders them, and
//! broadcasts every transition to subscribers.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use larkspur_core::NotificationStatus;

/// Capacity of the transition broadcast channel.
const BROADCAST_CAPACITY: usize = 64;

/// Capability for raising keyed notifications.
pub trait Notifier: Send + Sync {
    /// Show `message` under `key`, replacing whatever the key showed before.
    fn show(&self, key: &str, status: NotificationStatus, message: String);
}

/// The current state of one notification key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub key: String,
    pub status: NotificationStatus,
    pub message: String,
    pub updated_at: DateTime<Utc>,
}

/// Key -> current notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationBoard {
    entries: BTreeMap<String, Notification>,
}

impl NotificationBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a transition: the key now shows `status` / `message`.
    ///
    /// Returns the notification the key showed before, if any.
    pub fn apply(
        &mut self,
        key: &str,
        status: NotificationStatus,
        message: String,
    ) -> Option<Notification> {
        self.entries.insert(
            key.to_string(),
            Notification {
                key: key.to_string(),
                status,
                message,
                updated_at: Utc::now(),
            },
        )
    }

    /// The notification currently shown under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Notification> {
        self.entries.get(key)
    }

    /// Remove a notification once the user dismisses it.
    pub fn dismiss(&mut self, key: &str) -> Option<Notification> {
        self.entries.remove(key)
    }

    /// Number of keys with a notification.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shared, observable notification board.
///
/// Cheaply cloneable; clones share the same board.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<NotificationCenterInner>,
}

struct NotificationCenterInner {
    board: Mutex<NotificationBoard>,
    transitions: broadcast::Sender<Notification>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    /// Create a center with an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(NotificationBoard::new())
    }

    /// Create a center seeded with an existing board (e.g. from the session).
    #[must_use]
    pub fn from_board(board: NotificationBoard) -> Self {
        let (transitions, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            inner: Arc::new(NotificationCenterInner {
                board: Mutex::new(board),
                transitions,
            }),
        }
    }

    /// Subscribe to every transition applied from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.inner.transitions.subscribe()
    }

    /// Copy of the current board.
    #[must_use]
    pub fn snapshot(&self) -> NotificationBoard {
        self.board().clone()
    }

    /// The notification currently shown under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Notification> {
        self.board().get(key).cloned()
    }

    fn board(&self) -> MutexGuard<'_, NotificationBoard> {
        // The board holds no invariants a panicking writer could break.
        self.inner
            .board
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for NotificationCenter {
    fn show(&self, key: &str, status: NotificationStatus, message: String) {
        let notification = {
            let mut board = self.board();
            board.apply(key, status, message);
            board.get(key).cloned()
        };

        if let Some(notification) = notification {
            tracing::debug!(
                key = %notification.key,
                status = ?notification.status,
                "Notification updated"
            );
            // No subscribers is fine.
            let _ = self.inner.transitions.send(notification);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_by_key() {
        let mut board = NotificationBoard::new();
        assert!(
            board
                .apply("add-wishlist-1", NotificationStatus::Pending, "adding".into())
                .is_none()
        );

        let previous = board
            .apply("add-wishlist-1", NotificationStatus::Success, "added".into())
            .unwrap();
        assert_eq!(previous.status, NotificationStatus::Pending);

        assert_eq!(board.len(), 1);
        let current = board.get("add-wishlist-1").unwrap();
        assert_eq!(current.status, NotificationStatus::Success);
        assert_eq!(current.message, "added");
    }

    #[test]
    fn test_distinct_keys_do_not_collide() {
        let mut board = NotificationBoard::new();
        board.apply("add-wishlist-1", NotificationStatus::Pending, "one".into());
        board.apply("add-wishlist-2", NotificationStatus::Error, "two".into());

        assert_eq!(board.len(), 2);
        assert_eq!(
            board.get("add-wishlist-1").unwrap().status,
            NotificationStatus::Pending
        );
        assert_eq!(
            board.get("add-wishlist-2").unwrap().status,
            NotificationStatus::Error
        );
    }

    #[test]
    fn test_dismiss_removes_key() {
        let mut board = NotificationBoard::new();
        board.apply("k", NotificationStatus::Success, "done".into());
        assert!(board.dismiss("k").is_some());
        assert!(board.is_empty());
    }

    #[test]
    fn test_board_serde_round_trip() {
        let mut board = NotificationBoard::new();
        board.apply("k", NotificationStatus::Error, "failed".into());

        let json = serde_json::to_string(&board).unwrap();
        let restored: NotificationBoard = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
    }

    #[tokio::test]
    async fn test_center_broadcasts_transitions() {
        let center = NotificationCenter::new();
        let mut rx = center.subscribe();

        center.show("k", NotificationStatus::Pending, "working".into());
        center.show("k", NotificationStatus::Success, "done".into());

        assert_eq!(rx.recv().await.unwrap().status, NotificationStatus::Pending);
        assert_eq!(rx.recv().await.unwrap().status, NotificationStatus::Success);
        assert_eq!(
            center.get("k").unwrap().status,
            NotificationStatus::Success
        );
    }

    #[test]
    fn test_center_clones_share_board() {
        let center = NotificationCenter::new();
        let clone = center.clone();
        clone.show("k", NotificationStatus::Error, "nope".into());
        assert_eq!(center.snapshot().len(), 1);
    }
}
