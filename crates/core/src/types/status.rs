//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Status of a keyed user notification.
///
/// A notification key moves from `Pending` to exactly one terminal status.
/// A new action under the same key starts over at `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    #[default]
    Pending,
    Success,
    Error,
}

impl NotificationStatus {
    /// Whether this status ends the notification's timeline.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!NotificationStatus::Pending.is_terminal());
        assert!(NotificationStatus::Success.is_terminal());
        assert!(NotificationStatus::Error.is_terminal());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&NotificationStatus::Error).unwrap(),
            "\"error\""
        );
    }
}
