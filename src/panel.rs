//! Floating dropdown panels.
//!
//! A `FloatingPanel` owns one trigger/panel pair: its open/closed flag, the
//! anchor rectangle it is positioned against, the pending hover-close timer
//! and, while open, its window-level listeners. Panels sharing a
//! `SectionBus` form an exclusive set: opening one publishes its identity
//! and every sibling closes before the opener reports itself open.
//!
//! All entry points return whether the call changed something observable,
//! in the same spirit as `Component::handle_event`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::bus::{SectionBus, SectionId, Subscription};
use crate::constants::{SECTION_HOVER_CLOSE_DELAY, SECTION_PANEL_WIDTH};
use crate::keybindings::PanelKey;
use crate::layout::{AnchorRect, PanelMetrics, PanelPosition, compute_position};
use crate::listeners::{HitPath, ListenerGuard, ListenerKind, WindowEvent, WindowEvents};
use crate::pointer::{PointerMode, PointerModeTracker};
use crate::timer::DebounceTimer;

/// Role of a panel body in the accessibility tree.
pub const PANEL_ROLE: &str = "menu";
/// Role of a navigable entry inside a panel body.
pub const ENTRY_ROLE: &str = "menuitem";

static NEXT_PANEL_UID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

/// Which clicks on the trigger toggle the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickPolicy {
    /// Every click toggles, whatever the pointer mode.
    Always,
    /// Mouse clicks are ignored because hover already drives the panel.
    NonMouseOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenReason {
    Hover,
    Click,
    Keyboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    HoverLeave,
    OutsidePointer,
    Escape,
    RouteChange,
    SiblingOpened(SectionId),
    Toggle,
    EntrySelected,
    /// The layout switched to one without floating panels.
    LayoutChange,
}

#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub section: SectionId,
    pub width: f32,
    pub hover_delay: Duration,
    pub click_policy: ClickPolicy,
    pub metrics: PanelMetrics,
}

impl PanelConfig {
    pub fn new(section: SectionId) -> Self {
        Self {
            section,
            width: SECTION_PANEL_WIDTH,
            hover_delay: SECTION_HOVER_CLOSE_DELAY,
            click_policy: ClickPolicy::Always,
            metrics: PanelMetrics::pixels(),
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_hover_delay(mut self, delay: Duration) -> Self {
        self.hover_delay = delay;
        self
    }

    pub fn with_click_policy(mut self, policy: ClickPolicy) -> Self {
        self.click_policy = policy;
        self
    }

    pub fn with_metrics(mut self, metrics: PanelMetrics) -> Self {
        self.metrics = metrics;
        self
    }
}

/// Trigger attributes that must mirror the panel's visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AriaAttributes {
    pub haspopup: &'static str,
    pub expanded: bool,
    pub controls: String,
}

impl AriaAttributes {
    pub fn pairs(&self) -> [(&'static str, String); 3] {
        [
            ("aria-haspopup", self.haspopup.to_string()),
            ("aria-expanded", self.expanded.to_string()),
            ("aria-controls", self.controls.clone()),
        ]
    }
}

#[derive(Debug)]
struct PanelState {
    section: SectionId,
    visibility: Visibility,
    width: f32,
    metrics: PanelMetrics,
    anchor: Option<AnchorRect>,
    body: Option<AnchorRect>,
    position: Option<PanelPosition>,
    close_timer: DebounceTimer,
    listeners: Option<ListenerGuard>,
}

impl PanelState {
    /// Missing anchor: keep the previous position.
    fn reposition(&mut self, viewport_width: f32) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        self.position = Some(compute_position(
            &anchor,
            self.width,
            viewport_width,
            &self.metrics,
        ));
        true
    }

    fn close(&mut self, reason: CloseReason) -> bool {
        self.close_timer.cancel();
        if self.visibility == Visibility::Closed {
            return false;
        }
        self.visibility = Visibility::Closed;
        self.position = None;
        self.body = None;
        self.listeners = None;
        tracing::debug!(section = %self.section, reason = ?reason, "panel closed");
        true
    }
}

pub struct FloatingPanel {
    section: SectionId,
    dom_id: String,
    click_policy: ClickPolicy,
    state: Rc<RefCell<PanelState>>,
    bus: SectionBus,
    window: WindowEvents,
    pointer: PointerModeTracker,
    _subscription: Subscription,
}

impl FloatingPanel {
    /// Mount a panel: it subscribes to `bus` immediately and unsubscribes
    /// when dropped.
    pub fn new(
        config: PanelConfig,
        bus: &SectionBus,
        window: &WindowEvents,
        pointer: &PointerModeTracker,
    ) -> Self {
        let uid = NEXT_PANEL_UID.fetch_add(1, Ordering::Relaxed);
        let dom_id = format!("{}-panel-{}", config.section, uid);
        let state = Rc::new(RefCell::new(PanelState {
            section: config.section.clone(),
            visibility: Visibility::Closed,
            width: config.width,
            metrics: config.metrics,
            anchor: None,
            body: None,
            position: None,
            close_timer: DebounceTimer::new(config.hover_delay),
            listeners: None,
        }));
        let subscription = subscribe_siblings(bus, &config.section, Rc::downgrade(&state));
        Self {
            section: config.section,
            dom_id,
            click_policy: config.click_policy,
            state,
            bus: bus.clone(),
            window: window.clone(),
            pointer: pointer.clone(),
            _subscription: subscription,
        }
    }

    pub fn section(&self) -> &SectionId {
        &self.section
    }

    pub fn dom_id(&self) -> &str {
        &self.dom_id
    }

    pub fn pointer(&self) -> &PointerModeTracker {
        &self.pointer
    }

    pub fn visibility(&self) -> Visibility {
        self.state.borrow().visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility() == Visibility::Open
    }

    pub fn position(&self) -> Option<PanelPosition> {
        self.state.borrow().position
    }

    pub fn anchor(&self) -> Option<AnchorRect> {
        self.state.borrow().anchor
    }

    pub fn body(&self) -> Option<AnchorRect> {
        self.state.borrow().body
    }

    pub fn close_pending(&self) -> bool {
        self.state.borrow().close_timer.is_pending()
    }

    pub fn hover_delay(&self) -> Duration {
        self.state.borrow().close_timer.delay()
    }

    pub fn aria(&self) -> AriaAttributes {
        AriaAttributes {
            haspopup: PANEL_ROLE,
            expanded: self.is_open(),
            controls: self.dom_id.clone(),
        }
    }

    /// Record where the trigger currently sits. An open panel follows the
    /// anchor immediately.
    pub fn set_anchor(&self, anchor: Option<AnchorRect>) {
        let viewport_width = self.window.viewport().width;
        let mut state = self.state.borrow_mut();
        if state.anchor == anchor {
            return;
        }
        state.anchor = anchor;
        if state.visibility == Visibility::Open {
            state.reposition(viewport_width);
        }
    }

    /// Record the rendered panel body. Ignored while closed since there is
    /// no body on screen.
    pub fn set_body(&self, body: Option<AnchorRect>) {
        let mut state = self.state.borrow_mut();
        if state.visibility == Visibility::Open {
            state.body = body;
        }
    }

    pub fn open(&self, reason: OpenReason) -> bool {
        if self.is_open() {
            self.state.borrow_mut().close_timer.cancel();
            return false;
        }
        // Siblings close inside this call, before this panel flips to open.
        self.bus.publish(&self.section);
        let guard = self.listen_window();
        let viewport_width = self.window.viewport().width;
        let mut state = self.state.borrow_mut();
        state.close_timer.cancel();
        state.visibility = Visibility::Open;
        state.listeners = Some(guard);
        state.reposition(viewport_width);
        tracing::debug!(
            section = %self.section,
            reason = ?reason,
            position = ?state.position,
            "panel opened"
        );
        true
    }

    pub fn close(&self, reason: CloseReason) -> bool {
        self.state.borrow_mut().close(reason)
    }

    pub fn toggle(&self, reason: OpenReason) -> bool {
        if self.is_open() {
            self.close(CloseReason::Toggle)
        } else {
            self.open(reason)
        }
    }

    pub fn pointer_enter_anchor(&self, mode: PointerMode) -> bool {
        self.pointer.record(mode);
        if !mode.is_mouse() {
            return false;
        }
        self.cancel_close();
        self.open(OpenReason::Hover)
    }

    /// Moving from the trigger into the panel body keeps the panel open.
    pub fn pointer_enter_panel(&self, mode: PointerMode) -> bool {
        self.pointer.record(mode);
        self.cancel_close()
    }

    pub fn pointer_leave(&self, mode: PointerMode, now: Instant) -> bool {
        self.pointer.record(mode);
        self.schedule_close(now)
    }

    pub fn pointer_down_anchor(&self, mode: PointerMode) {
        self.pointer.record(mode);
    }

    pub fn click_anchor(&self) -> bool {
        if self.click_policy == ClickPolicy::NonMouseOnly && self.pointer.is_mouse() {
            return false;
        }
        self.toggle(OpenReason::Click)
    }

    pub fn key_on_anchor(&self, key: PanelKey) -> bool {
        match key {
            PanelKey::Enter | PanelKey::Space => self.toggle(OpenReason::Keyboard),
            PanelKey::ArrowDown => self.open(OpenReason::Keyboard),
            PanelKey::Escape => self.close(CloseReason::Escape),
            PanelKey::Other => false,
        }
    }

    /// Arm the hover-close timer. A no-op unless the last pointer was a
    /// mouse and the panel is open.
    pub fn schedule_close(&self, now: Instant) -> bool {
        if !self.pointer.is_mouse() {
            return false;
        }
        let mut state = self.state.borrow_mut();
        if state.visibility != Visibility::Open {
            return false;
        }
        state.close_timer.schedule(now);
        tracing::trace!(section = %self.section, deadline = ?state.close_timer.deadline(), "close scheduled");
        true
    }

    pub fn cancel_close(&self) -> bool {
        self.state.borrow_mut().close_timer.cancel()
    }

    /// Fire the hover-close timer if it is due.
    pub fn tick(&self, now: Instant) -> bool {
        let mut state = self.state.borrow_mut();
        if state.close_timer.fire(now) {
            state.close(CloseReason::HoverLeave)
        } else {
            false
        }
    }

    fn listen_window(&self) -> ListenerGuard {
        let weak = Rc::downgrade(&self.state);
        self.window.listen(
            &[
                ListenerKind::Resize,
                ListenerKind::Scroll,
                ListenerKind::PointerDown,
                ListenerKind::KeyDown,
            ],
            move |event, viewport| {
                let Some(cell) = weak.upgrade() else {
                    return;
                };
                let mut state = cell.borrow_mut();
                match *event {
                    WindowEvent::Resize { .. } | WindowEvent::Scroll { .. } => {
                        state.reposition(viewport.width);
                    }
                    WindowEvent::PointerDown { x, y, .. } => {
                        let path =
                            HitPath::resolve(x, y, state.anchor.as_ref(), state.body.as_ref());
                        if path.is_outside() {
                            state.close(CloseReason::OutsidePointer);
                        }
                    }
                    WindowEvent::KeyDown(PanelKey::Escape) => {
                        state.close(CloseReason::Escape);
                    }
                    WindowEvent::KeyDown(_) => {}
                }
            },
        )
    }
}

impl std::fmt::Debug for FloatingPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloatingPanel")
            .field("section", &self.section)
            .field("dom_id", &self.dom_id)
            .field("state", &self.state.borrow())
            .finish()
    }
}

fn subscribe_siblings(
    bus: &SectionBus,
    section: &SectionId,
    state: Weak<RefCell<PanelState>>,
) -> Subscription {
    let own = section.clone();
    bus.subscribe(section.clone(), move |opened| {
        if *opened == own {
            return;
        }
        if let Some(cell) = state.upgrade() {
            cell.borrow_mut()
                .close(CloseReason::SiblingOpened(opened.clone()));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::Viewport;

    fn surface() -> (SectionBus, WindowEvents, PointerModeTracker) {
        (
            SectionBus::new(),
            WindowEvents::new(Viewport {
                width: 1024.0,
                height: 768.0,
                scroll_y: 0.0,
            }),
            PointerModeTracker::new(),
        )
    }

    fn panel(section: SectionId, surface: &(SectionBus, WindowEvents, PointerModeTracker)) -> FloatingPanel {
        let panel = FloatingPanel::new(PanelConfig::new(section), &surface.0, &surface.1, &surface.2);
        panel.set_anchor(Some(AnchorRect::new(500.0, 40.0, 560.0, 80.0)));
        panel
    }

    #[test]
    fn hover_opens_and_positions() {
        let s = surface();
        let p = panel(SectionId::SERVICES, &s);
        assert!(p.pointer_enter_anchor(PointerMode::Mouse));
        assert!(p.is_open());
        let pos = p.position().expect("positioned on open");
        assert_eq!((pos.top, pos.left, pos.width), (90.0, 150.0, 760.0));
        assert!(p.aria().expanded);
    }

    #[test]
    fn touch_enter_does_not_open() {
        let s = surface();
        let p = panel(SectionId::SERVICES, &s);
        assert!(!p.pointer_enter_anchor(PointerMode::Touch));
        assert!(!p.is_open());
        assert_eq!(s.2.mode(), PointerMode::Touch);
    }

    #[test]
    fn leave_then_reenter_cancels_close() {
        let s = surface();
        let p = panel(SectionId::GALLERY, &s);
        let t0 = Instant::now();
        p.pointer_enter_anchor(PointerMode::Mouse);
        assert!(p.pointer_leave(PointerMode::Mouse, t0));
        assert!(p.pointer_enter_panel(PointerMode::Mouse));
        assert!(!p.tick(t0 + Duration::from_millis(500)));
        assert!(p.is_open());
    }

    #[test]
    fn leave_closes_after_delay() {
        let s = surface();
        let p = panel(SectionId::GALLERY, &s);
        let t0 = Instant::now();
        p.pointer_enter_anchor(PointerMode::Mouse);
        p.pointer_leave(PointerMode::Mouse, t0);
        assert!(!p.tick(t0 + Duration::from_millis(100)));
        assert!(p.is_open());
        assert!(p.tick(t0 + SECTION_HOVER_CLOSE_DELAY));
        assert!(!p.is_open());
        assert_eq!(s.1.listener_count(), 0);
    }

    #[test]
    fn touch_leave_never_schedules() {
        let s = surface();
        let p = panel(SectionId::SERVICES, &s);
        p.pointer_down_anchor(PointerMode::Touch);
        assert!(p.click_anchor());
        assert!(p.is_open());
        assert!(!p.pointer_leave(PointerMode::Touch, Instant::now()));
        assert!(!p.close_pending());
    }

    #[test]
    fn non_mouse_only_policy_ignores_mouse_clicks() {
        let s = surface();
        let p = FloatingPanel::new(
            PanelConfig::new(SectionId::LANGUAGE).with_click_policy(ClickPolicy::NonMouseOnly),
            &s.0,
            &s.1,
            &s.2,
        );
        assert!(!p.click_anchor());
        p.pointer_down_anchor(PointerMode::Pen);
        assert!(p.click_anchor());
        assert!(p.is_open());
        assert!(p.click_anchor());
        assert!(!p.is_open());
    }

    #[test]
    fn keyboard_transitions() {
        let s = surface();
        let p = panel(SectionId::SERVICES, &s);
        assert!(p.key_on_anchor(PanelKey::Enter));
        assert!(p.is_open());
        assert!(p.key_on_anchor(PanelKey::Space));
        assert!(!p.is_open());
        assert!(p.key_on_anchor(PanelKey::ArrowDown));
        assert!(!p.key_on_anchor(PanelKey::ArrowDown));
        assert!(p.key_on_anchor(PanelKey::Escape));
        assert!(!p.key_on_anchor(PanelKey::Other));
    }

    #[test]
    fn listeners_live_only_while_open() {
        let s = surface();
        let p = panel(SectionId::SERVICES, &s);
        assert_eq!(s.1.listener_count(), 0);
        p.open(OpenReason::Click);
        assert_eq!(s.1.listener_count(), 1);
        p.close(CloseReason::RouteChange);
        assert_eq!(s.1.listener_count(), 0);
        p.open(OpenReason::Click);
        drop(p);
        assert_eq!(s.1.listener_count(), 0);
        assert_eq!(s.0.subscriber_count(), 0);
    }

    #[test]
    fn resize_repositions_open_panel() {
        let s = surface();
        let p = panel(SectionId::SERVICES, &s);
        p.open(OpenReason::Click);
        s.1.dispatch(&WindowEvent::Resize {
            width: 600.0,
            height: 800.0,
        });
        let pos = p.position().expect("still open");
        assert_eq!(pos.width, 576.0);
        assert_eq!(pos.left, 12.0);
    }

    #[test]
    fn missing_anchor_skips_positioning() {
        let s = surface();
        let p = FloatingPanel::new(PanelConfig::new(SectionId::GALLERY), &s.0, &s.1, &s.2);
        assert!(p.open(OpenReason::Keyboard));
        assert!(p.position().is_none());
        s.1.dispatch(&WindowEvent::Scroll { offset: 30.0 });
        assert!(p.position().is_none());
        assert!(p.is_open());
    }

    #[test]
    fn outside_pointer_closes_and_inside_does_not() {
        let s = surface();
        let p = panel(SectionId::SERVICES, &s);
        p.open(OpenReason::Click);
        p.set_body(Some(AnchorRect::new(150.0, 90.0, 910.0, 400.0)));
        s.1.dispatch(&WindowEvent::PointerDown {
            x: 200.0,
            y: 200.0,
            mode: PointerMode::Mouse,
        });
        assert!(p.is_open());
        s.1.dispatch(&WindowEvent::PointerDown {
            x: 520.0,
            y: 50.0,
            mode: PointerMode::Mouse,
        });
        assert!(p.is_open());
        s.1.dispatch(&WindowEvent::PointerDown {
            x: 5.0,
            y: 700.0,
            mode: PointerMode::Touch,
        });
        assert!(!p.is_open());
    }

    #[test]
    fn missing_body_counts_as_outside() {
        let s = surface();
        let p = panel(SectionId::SERVICES, &s);
        p.open(OpenReason::Click);
        s.1.dispatch(&WindowEvent::PointerDown {
            x: 200.0,
            y: 200.0,
            mode: PointerMode::Mouse,
        });
        assert!(!p.is_open());
    }

    #[test]
    fn dom_ids_are_unique() {
        let s = surface();
        let a = panel(SectionId::SERVICES, &s);
        let b = panel(SectionId::SERVICES, &s);
        assert_ne!(a.dom_id(), b.dom_id());
        assert!(a.dom_id().starts_with("services-panel-"));
        let pairs = a.aria().pairs();
        assert_eq!(pairs[0], ("aria-haspopup", "menu".to_string()));
        assert_eq!(pairs[1], ("aria-expanded", "false".to_string()));
    }
}
