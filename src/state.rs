use crate::constants::SCROLL_TRANSPARENCY_THRESHOLD;

/// Stacked menu shown on narrow viewports, with one accordion per section.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MobileMenuState {
    open: bool,
    services_open: bool,
    gallery_open: bool,
}

impl MobileMenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) -> bool {
        self.open
    }

    pub fn services_open(&self) -> bool {
        self.services_open
    }

    pub fn gallery_open(&self) -> bool {
        self.gallery_open
    }

    /// Toggling the whole menu always collapses both accordions.
    pub fn toggle_menu(&mut self) {
        self.open = !self.open;
        self.services_open = false;
        self.gallery_open = false;
    }

    pub fn toggle_services(&mut self) {
        self.services_open = !self.services_open;
    }

    pub fn toggle_gallery(&mut self) {
        self.gallery_open = !self.gallery_open;
    }

    /// Returns whether anything was open.
    pub fn close_all(&mut self) -> bool {
        let was_open = self.open || self.services_open || self.gallery_open;
        *self = Self::default();
        was_open
    }
}

/// Tracks whether the page has scrolled past the header threshold.
#[derive(Debug, Clone, Copy)]
pub struct ScrollTransparency {
    threshold: f32,
    scrolled: bool,
    scrolled_dirty: bool,
}

impl ScrollTransparency {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            scrolled: false,
            scrolled_dirty: false,
        }
    }

    pub fn scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn update(&mut self, offset: f32) {
        let scrolled = offset >= self.threshold;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            self.scrolled_dirty = true;
        }
    }

    pub fn take_scrolled_change(&mut self) -> Option<bool> {
        if self.scrolled_dirty {
            self.scrolled_dirty = false;
            Some(self.scrolled)
        } else {
            None
        }
    }
}

impl Default for ScrollTransparency {
    fn default() -> Self {
        Self::new(SCROLL_TRANSPARENCY_THRESHOLD)
    }
}
