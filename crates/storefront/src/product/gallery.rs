//! Image gallery visibility.

/// Open/closed state of the product image gallery overlay.
///
/// Starts closed. Independent of product data, so it can be toggled before
/// the product has loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GalleryController {
    open: bool,
}

impl GalleryController {
    #[must_use]
    pub const fn new() -> Self {
        Self { open: false }
    }

    pub const fn open(&mut self) {
        self.open = true;
    }

    pub const fn close(&mut self) {
        self.open = false;
    }

    pub const fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Set visibility directly, as the overlay does when it closes itself.
    pub const fn set_visible(&mut self, visible: bool) {
        self.open = visible;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        assert!(!GalleryController::new().is_open());
    }

    #[test]
    fn test_open_close_idempotent() {
        let mut gallery = GalleryController::new();
        gallery.open();
        gallery.open();
        assert!(gallery.is_open());
        gallery.close();
        gallery.close();
        assert!(!gallery.is_open());
    }

    #[test]
    fn test_toggle_and_set_visible() {
        let mut gallery = GalleryController::new();
        gallery.toggle();
        assert!(gallery.is_open());
        gallery.set_visible(false);
        assert!(!gallery.is_open());
        gallery.toggle();
        gallery.toggle();
        assert!(!gallery.is_open());
    }
}
