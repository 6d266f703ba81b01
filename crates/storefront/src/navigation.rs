//! Navigation capability.
//!
//! Product-detail logic asks for a redirect through [`Navigator`]; the HTTP
//! layer records the request with [`NavigationRecorder`] and turns it into a
//! `303 See Other` once the handler finishes.

use std::sync::{Mutex, PoisonError};

use larkspur_core::Route;

/// Capability for redirecting the user.
pub trait Navigator: Send + Sync {
    /// Navigate to `route`.
    fn redirect(&self, route: Route);
}

/// Records redirect requests. The last request wins.
#[derive(Debug, Default)]
pub struct NavigationRecorder {
    redirects: Mutex<Vec<Route>>,
}

impl NavigationRecorder {
    /// Create a recorder with no redirects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The route the user should end up on, if any redirect was requested.
    #[must_use]
    pub fn destination(&self) -> Option<Route> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }

    /// Every redirect requested, in order.
    #[must_use]
    pub fn history(&self) -> Vec<Route> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for NavigationRecorder {
    fn redirect(&self, route: Route) {
        tracing::debug!(route = %route, "Redirect requested");
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_starts_empty() {
        let recorder = NavigationRecorder::new();
        assert_eq!(recorder.destination(), None);
        assert!(recorder.history().is_empty());
    }

    #[test]
    fn test_last_redirect_wins() {
        let recorder = NavigationRecorder::new();
        recorder.redirect(Route::Account);
        recorder.redirect(Route::Catalog);
        assert_eq!(recorder.destination(), Some(Route::Catalog));
        assert_eq!(recorder.history(), vec![Route::Account, Route::Catalog]);
    }
}
