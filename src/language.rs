use crate::bus::{SectionBus, SectionId};
use crate::constants::{LANGUAGE_HOVER_CLOSE_DELAY, LANGUAGE_PANEL_WIDTH};
use crate::layout::PanelMetrics;
use crate::listeners::WindowEvents;
use crate::panel::{ClickPolicy, CloseReason, FloatingPanel, PanelConfig};
use crate::pointer::PointerModeTracker;
use crate::routing::{Locale, locale_href};

/// Role of each language choice; the active one is `aria-checked`.
pub const LANGUAGE_ENTRY_ROLE: &str = "menuitemradio";

/// A route change requested by the navbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub href: String,
    /// Replace the current history entry instead of pushing one.
    pub replace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageEntry {
    pub locale: Locale,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

impl LanguageEntry {
    pub fn aria_checked(&self) -> &'static str {
        if self.active { "true" } else { "false" }
    }
}

pub fn language_panel_config(width: f32, metrics: PanelMetrics) -> PanelConfig {
    PanelConfig::new(SectionId::LANGUAGE)
        .with_width(width)
        .with_hover_delay(LANGUAGE_HOVER_CLOSE_DELAY)
        .with_click_policy(ClickPolicy::NonMouseOnly)
        .with_metrics(metrics)
}

/// Locale picker. Mouse users open it by hovering; touch and pen users tap
/// the trigger.
#[derive(Debug)]
pub struct LanguageSwitcher {
    panel: FloatingPanel,
}

impl LanguageSwitcher {
    pub fn new(bus: &SectionBus, window: &WindowEvents, pointer: &PointerModeTracker) -> Self {
        Self::with_config(
            language_panel_config(LANGUAGE_PANEL_WIDTH, PanelMetrics::pixels()),
            bus,
            window,
            pointer,
        )
    }

    pub fn with_config(
        config: PanelConfig,
        bus: &SectionBus,
        window: &WindowEvents,
        pointer: &PointerModeTracker,
    ) -> Self {
        Self {
            panel: FloatingPanel::new(config, bus, window, pointer),
        }
    }

    pub fn panel(&self) -> &FloatingPanel {
        &self.panel
    }

    pub fn entries(&self, current: Locale, pathname: &str, query: &str) -> Vec<LanguageEntry> {
        Locale::ALL
            .iter()
            .map(|&locale| LanguageEntry {
                locale,
                label: locale.native_label(),
                href: locale_href(pathname, query, locale),
                active: locale == current,
            })
            .collect()
    }

    /// Pick a locale: the panel closes and the current page is replaced by
    /// its counterpart in `locale`.
    pub fn select(&self, locale: Locale, pathname: &str, query: &str) -> Navigation {
        self.panel.close(CloseReason::EntrySelected);
        tracing::debug!(locale = %locale, "language selected");
        Navigation {
            href: locale_href(pathname, query, locale),
            replace: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::Viewport;
    use crate::panel::OpenReason;
    use crate::pointer::PointerMode;
    use std::time::{Duration, Instant};

    fn switcher() -> (LanguageSwitcher, WindowEvents, PointerModeTracker) {
        let bus = SectionBus::new();
        let window = WindowEvents::new(Viewport {
            width: 1280.0,
            height: 720.0,
            scroll_y: 0.0,
        });
        let pointer = PointerModeTracker::new();
        (LanguageSwitcher::new(&bus, &window, &pointer), window, pointer)
    }

    #[test]
    fn entries_mark_active_locale_and_keep_query() {
        let (s, _, _) = switcher();
        let entries = s.entries(Locale::En, "/en/gallery", "page=2");
        assert_eq!(entries.len(), 2);
        let en = entries.iter().find(|e| e.locale == Locale::En).expect("en");
        let ar = entries.iter().find(|e| e.locale == Locale::Ar).expect("ar");
        assert!(en.active);
        assert_eq!(en.aria_checked(), "true");
        assert_eq!(ar.href, "/ar/gallery?page=2");
        assert_eq!(ar.aria_checked(), "false");
    }

    #[test]
    fn select_closes_and_replaces_route() {
        let (s, _, _) = switcher();
        s.panel().open(OpenReason::Keyboard);
        let nav = s.select(Locale::Ar, "/en/about", "");
        assert!(!s.panel().is_open());
        assert_eq!(
            nav,
            Navigation {
                href: "/ar/about".to_string(),
                replace: true
            }
        );
    }

    #[test]
    fn hover_close_uses_shorter_delay() {
        let (s, _, _) = switcher();
        let t0 = Instant::now();
        assert_eq!(s.panel().hover_delay(), Duration::from_millis(120));
        s.panel().pointer_enter_anchor(PointerMode::Mouse);
        s.panel().pointer_leave(PointerMode::Mouse, t0);
        assert!(s.panel().tick(t0 + Duration::from_millis(120)));
    }

    #[test]
    fn mouse_click_is_ignored_but_tap_toggles() {
        let (s, _, pointer) = switcher();
        assert!(!s.panel().click_anchor());
        pointer.record(PointerMode::Touch);
        assert!(s.panel().click_anchor());
        assert!(s.panel().is_open());
    }
}
