//! The site header: plain links, two section panels and the language
//! switcher, all sharing one exclusive set.
//!
//! `Navbar` owns the interaction surface (bus, window target, pointer
//! tracker) and routes terminal input into the panels. Rendering lives in
//! `crate::render` and writes the hit regions this module tests against.

use std::time::Instant;

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::bus::{SectionBus, SectionId};
use crate::constants::{
    CELL_LANGUAGE_PANEL_WIDTH, CELL_SECTION_PANEL_WIDTH, LANGUAGE_PANEL_WIDTH,
    SECTION_HOVER_CLOSE_DELAY, SECTION_PANEL_WIDTH,
};
use crate::hover::{HoverTarget, HoverTracker, HoverTransition};
use crate::keybindings::{Action, KeyBindings, PanelKey};
use crate::language::{LanguageSwitcher, Navigation, language_panel_config};
use crate::layout::{PanelMetrics, rect_contains};
use crate::listeners::{Viewport, WindowEvent, WindowEvents};
use crate::menu::{MenuData, MenuEntry};
use crate::panel::{CloseReason, FloatingPanel, PanelConfig};
use crate::pointer::{PointerMode, PointerModeTracker};
use crate::routing::{Locale, is_active, resolve_locale, split_query};
use crate::state::{MobileMenuState, ScrollTransparency};

/// Rows scrolled per wheel notch or page key.
const SCROLL_STEP: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavItem {
    Home,
    Services,
    Gallery,
    Contact,
    About,
    Language,
}

impl NavItem {
    /// Visual and focus order of the desktop row.
    pub const ORDER: [NavItem; 6] = [
        NavItem::Home,
        NavItem::Services,
        NavItem::Gallery,
        NavItem::Contact,
        NavItem::About,
        NavItem::Language,
    ];

    pub fn section(self) -> Option<SectionId> {
        match self {
            NavItem::Services => Some(SectionId::SERVICES),
            NavItem::Gallery => Some(SectionId::GALLERY),
            NavItem::Language => Some(SectionId::LANGUAGE),
            _ => None,
        }
    }

    /// Key in the `nav` namespace.
    pub fn label_key(self) -> &'static str {
        match self {
            NavItem::Home => "home",
            NavItem::Services => "services",
            NavItem::Gallery => "gallery",
            NavItem::Contact => "contact",
            NavItem::About => "about",
            NavItem::Language => "language",
        }
    }

    /// Target of a plain link. Panel triggers have none.
    pub fn href(self, locale: Locale) -> Option<String> {
        match self {
            NavItem::Home => Some(locale.root()),
            NavItem::Contact => Some(format!("{}/contact", locale.root())),
            NavItem::About => Some(format!("{}/about", locale.root())),
            _ => None,
        }
    }
}

/// Unit system the panels are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelScale {
    #[default]
    Pixels,
    Cells,
}

impl PanelScale {
    pub fn metrics(self) -> PanelMetrics {
        match self {
            PanelScale::Pixels => PanelMetrics::pixels(),
            PanelScale::Cells => PanelMetrics::cells(),
        }
    }

    pub fn section_width(self) -> f32 {
        match self {
            PanelScale::Pixels => SECTION_PANEL_WIDTH,
            PanelScale::Cells => CELL_SECTION_PANEL_WIDTH,
        }
    }

    pub fn language_width(self) -> f32 {
        match self {
            PanelScale::Pixels => LANGUAGE_PANEL_WIDTH,
            PanelScale::Cells => CELL_LANGUAGE_PANEL_WIDTH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavbarConfig {
    pub pathname: String,
    pub query: String,
    pub scale: PanelScale,
    /// How pointer input from the terminal is classified.
    pub input_mode: PointerMode,
    pub viewport: Viewport,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            pathname: Locale::default().root(),
            query: String::new(),
            scale: PanelScale::Pixels,
            input_mode: PointerMode::Mouse,
            viewport: Viewport {
                width: 1024.0,
                height: 768.0,
                scroll_y: 0.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryTarget {
    Menu(MenuEntry),
    Language(Locale),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MobileRow {
    Link(NavItem),
    Accordion(SectionId),
    Entry(MenuEntry),
}

/// Hit regions written by the last render, in terminal cells.
#[derive(Debug, Clone, Default)]
pub struct NavHits {
    pub items: Vec<(NavItem, Rect)>,
    pub bodies: Vec<(SectionId, Rect)>,
    pub entries: Vec<(EntryTarget, Rect)>,
    pub mobile_toggle: Option<Rect>,
    pub mobile_rows: Vec<(MobileRow, Rect)>,
}

impl NavHits {
    pub fn clear(&mut self) {
        self.items.clear();
        self.bodies.clear();
        self.entries.clear();
        self.mobile_toggle = None;
        self.mobile_rows.clear();
    }

    fn target_at(&self, column: u16, row: u16) -> Option<HitTarget> {
        // panel bodies paint over everything else
        if let Some((entry, _)) = self
            .entries
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
        {
            return Some(HitTarget::Entry(entry.clone()));
        }
        if let Some((section, _)) = self
            .bodies
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
        {
            return Some(HitTarget::Body(section.clone()));
        }
        if let Some((item, _)) = self
            .items
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
        {
            return Some(HitTarget::Item(*item));
        }
        if self
            .mobile_toggle
            .is_some_and(|rect| rect_contains(rect, column, row))
        {
            return Some(HitTarget::MobileToggle);
        }
        self.mobile_rows
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
            .map(|(row, _)| HitTarget::Mobile(row.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HitTarget {
    Item(NavItem),
    Body(SectionId),
    Entry(EntryTarget),
    MobileToggle,
    Mobile(MobileRow),
}

impl HitTarget {
    fn hover(&self) -> Option<HoverTarget> {
        match self {
            HitTarget::Item(item) => item.section().map(HoverTarget::Anchor),
            HitTarget::Body(section) => Some(HoverTarget::Body(section.clone())),
            HitTarget::Entry(EntryTarget::Menu(entry)) => {
                Some(HoverTarget::Body(entry.section.clone()))
            }
            HitTarget::Entry(EntryTarget::Language(_)) => {
                Some(HoverTarget::Body(SectionId::LANGUAGE))
            }
            HitTarget::MobileToggle | HitTarget::Mobile(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavOutcome {
    #[default]
    Ignored,
    Handled,
    Navigated(Navigation),
    Quit,
}

impl NavOutcome {
    fn from_changed(changed: bool) -> Self {
        if changed {
            NavOutcome::Handled
        } else {
            NavOutcome::Ignored
        }
    }
}

pub struct Navbar {
    locale: Locale,
    pathname: String,
    query: String,
    input_mode: PointerMode,
    menu: MenuData,
    bindings: KeyBindings,
    bus: SectionBus,
    window: WindowEvents,
    pointer: PointerModeTracker,
    services: FloatingPanel,
    gallery: FloatingPanel,
    language: LanguageSwitcher,
    mobile: MobileMenuState,
    scroll: ScrollTransparency,
    focus: Option<NavItem>,
    panel_cursor: Option<usize>,
    hover: HoverTracker,
    pressed: Option<HitTarget>,
    history: Vec<Navigation>,
    pub(crate) hits: NavHits,
}

impl Navbar {
    pub fn new(config: NavbarConfig, menu: MenuData) -> Self {
        let bus = SectionBus::new();
        let window = WindowEvents::new(config.viewport);
        let pointer = PointerModeTracker::new();
        let metrics = config.scale.metrics();
        let section_config = |section: SectionId| {
            PanelConfig::new(section)
                .with_width(config.scale.section_width())
                .with_hover_delay(SECTION_HOVER_CLOSE_DELAY)
                .with_metrics(metrics)
        };
        let services = FloatingPanel::new(section_config(SectionId::SERVICES), &bus, &window, &pointer);
        let gallery = FloatingPanel::new(section_config(SectionId::GALLERY), &bus, &window, &pointer);
        let language = LanguageSwitcher::with_config(
            language_panel_config(config.scale.language_width(), metrics),
            &bus,
            &window,
            &pointer,
        );
        Self {
            locale: resolve_locale(&config.pathname),
            pathname: config.pathname,
            query: config.query,
            input_mode: config.input_mode,
            menu,
            bindings: KeyBindings::default(),
            bus,
            window,
            pointer,
            services,
            gallery,
            language,
            mobile: MobileMenuState::new(),
            scroll: ScrollTransparency::default(),
            focus: None,
            panel_cursor: None,
            hover: HoverTracker::new(),
            pressed: None,
            history: Vec::new(),
            hits: NavHits::default(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn menu(&self) -> &MenuData {
        &self.menu
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bus(&self) -> &SectionBus {
        &self.bus
    }

    pub fn window(&self) -> &WindowEvents {
        &self.window
    }

    pub fn pointer(&self) -> &PointerModeTracker {
        &self.pointer
    }

    pub fn language(&self) -> &LanguageSwitcher {
        &self.language
    }

    pub fn mobile(&self) -> &MobileMenuState {
        &self.mobile
    }

    pub fn scroll(&self) -> &ScrollTransparency {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollTransparency {
        &mut self.scroll
    }

    pub fn focus(&self) -> Option<NavItem> {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Option<NavItem>) {
        self.focus = focus;
        self.panel_cursor = None;
    }

    pub fn panel_cursor(&self) -> Option<usize> {
        self.panel_cursor
    }

    pub fn history(&self) -> &[Navigation] {
        &self.history
    }

    pub fn hits(&self) -> &NavHits {
        &self.hits
    }

    pub fn panels(&self) -> [&FloatingPanel; 3] {
        [&self.services, &self.gallery, self.language.panel()]
    }

    pub fn panel(&self, section: &SectionId) -> Option<&FloatingPanel> {
        self.panels()
            .into_iter()
            .find(|panel| panel.section() == section)
    }

    pub fn open_section(&self) -> Option<SectionId> {
        self.panels()
            .into_iter()
            .find(|panel| panel.is_open())
            .map(|panel| panel.section().clone())
    }

    pub fn is_active(&self, item: NavItem) -> bool {
        item.href(self.locale)
            .is_some_and(|href| is_active(&self.pathname, &href))
    }

    /// Close every panel for a layout that cannot show them. Returns whether
    /// any panel was open.
    pub fn collapse_panels(&mut self) -> bool {
        let mut changed = false;
        for panel in self.panels() {
            changed |= panel.close(CloseReason::LayoutChange);
        }
        if changed {
            self.panel_cursor = None;
        }
        changed
    }

    /// Perform a client-side route change. Every panel and the mobile menu
    /// close unconditionally.
    pub fn navigate(&mut self, nav: Navigation) -> Navigation {
        let (path, query) = split_query(&nav.href);
        self.pathname = path.to_string();
        self.query = query.to_string();
        self.locale = resolve_locale(&self.pathname);
        for panel in self.panels() {
            panel.close(CloseReason::RouteChange);
        }
        self.mobile.close_all();
        self.panel_cursor = None;
        self.hover.reset();
        tracing::info!(href = %nav.href, replace = nav.replace, locale = %self.locale, "navigate");
        if nav.replace {
            self.history.pop();
        }
        self.history.push(nav.clone());
        nav
    }

    pub fn select_entry(&mut self, entry: &MenuEntry) -> Navigation {
        if let Some(panel) = self.panel(&entry.section) {
            panel.close(CloseReason::EntrySelected);
        }
        let href = entry.href(self.locale);
        self.navigate(Navigation {
            href,
            replace: false,
        })
    }

    pub fn select_language(&mut self, locale: Locale) -> Navigation {
        let nav = self.language.select(locale, &self.pathname, &self.query);
        self.navigate(nav)
    }

    /// Deliver a window-level event to every open panel, then apply the
    /// navbar's own reactions (Escape collapses the mobile menu, scroll
    /// drives the header style).
    pub fn dispatch(&mut self, event: WindowEvent) -> bool {
        let was_open = self.open_section();
        self.window.dispatch(&event);
        let mut changed = was_open != self.open_section();
        match event {
            WindowEvent::KeyDown(PanelKey::Escape) => {
                changed |= self.mobile.close_all();
                self.panel_cursor = None;
            }
            WindowEvent::Scroll { offset } => {
                self.scroll.update(offset.max(0.0));
                changed |= self.scroll.take_scrolled_change().is_some();
            }
            _ => {}
        }
        changed
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for panel in self.panels() {
            changed |= panel.tick(now);
        }
        changed
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) -> NavOutcome {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Resize(width, height) => {
                self.hover.reset();
                NavOutcome::from_changed(self.dispatch(WindowEvent::Resize {
                    width: *width as f32,
                    height: *height as f32,
                }))
            }
            _ => NavOutcome::Ignored,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> NavOutcome {
        let Some(action) = self.bindings.action_for_key(key) else {
            return NavOutcome::Ignored;
        };
        match action {
            Action::Quit => NavOutcome::Quit,
            Action::FocusNext => {
                self.cycle_focus(1);
                NavOutcome::Handled
            }
            Action::FocusPrev => {
                self.cycle_focus(-1);
                NavOutcome::Handled
            }
            Action::Activate => self.activate_focused(),
            Action::OpenPanel => self.open_focused(),
            Action::Dismiss => {
                NavOutcome::from_changed(self.dispatch(WindowEvent::KeyDown(PanelKey::Escape)))
            }
            Action::ToggleMobileMenu => {
                self.mobile.toggle_menu();
                NavOutcome::Handled
            }
            Action::ScrollUp | Action::ScrollDown => {
                let delta = if action == Action::ScrollUp {
                    -SCROLL_STEP
                } else {
                    SCROLL_STEP
                };
                let offset = (self.window.viewport().scroll_y + delta).max(0.0);
                self.dispatch(WindowEvent::Scroll { offset });
                NavOutcome::Handled
            }
        }
    }

    fn cycle_focus(&mut self, step: isize) {
        let len = NavItem::ORDER.len() as isize;
        let next = match self.focus {
            None if step >= 0 => 0,
            None => len - 1,
            Some(item) => {
                let idx = NavItem::ORDER
                    .iter()
                    .position(|candidate| *candidate == item)
                    .unwrap_or(0) as isize;
                (idx + step).rem_euclid(len)
            }
        };
        self.set_focus(Some(NavItem::ORDER[next as usize]));
    }

    /// Entries reachable with the keyboard inside the focused open panel.
    fn cursor_targets(&self, section: &SectionId) -> Vec<EntryTarget> {
        if *section == SectionId::LANGUAGE {
            Locale::ALL.iter().copied().map(EntryTarget::Language).collect()
        } else {
            self.menu
                .entries(section)
                .into_iter()
                .cloned()
                .map(EntryTarget::Menu)
                .collect()
        }
    }

    fn activate_focused(&mut self) -> NavOutcome {
        let Some(item) = self.focus else {
            return NavOutcome::Ignored;
        };
        match item.section() {
            Some(section) => {
                if let Some(index) = self.panel_cursor
                    && let Some(target) = self.cursor_targets(&section).get(index).cloned()
                {
                    return self.activate_entry(target);
                }
                let changed = self
                    .panel(&section)
                    .is_some_and(|panel| panel.key_on_anchor(PanelKey::Enter));
                self.panel_cursor = None;
                NavOutcome::from_changed(changed)
            }
            None => match item.href(self.locale) {
                Some(href) => NavOutcome::Navigated(self.navigate(Navigation {
                    href,
                    replace: false,
                })),
                None => NavOutcome::Ignored,
            },
        }
    }

    fn open_focused(&mut self) -> NavOutcome {
        let Some(section) = self.focus.and_then(NavItem::section) else {
            return NavOutcome::Ignored;
        };
        let Some(panel) = self.panel(&section) else {
            return NavOutcome::Ignored;
        };
        if panel.is_open() {
            let count = self.cursor_targets(&section).len();
            if count == 0 {
                return NavOutcome::Ignored;
            }
            self.panel_cursor = Some(match self.panel_cursor {
                Some(index) => (index + 1) % count,
                None => 0,
            });
            return NavOutcome::Handled;
        }
        let changed = panel.key_on_anchor(PanelKey::ArrowDown);
        self.panel_cursor = None;
        NavOutcome::from_changed(changed)
    }

    fn activate_entry(&mut self, target: EntryTarget) -> NavOutcome {
        let nav = match target {
            EntryTarget::Menu(entry) => self.select_entry(&entry),
            EntryTarget::Language(locale) => self.select_language(locale),
        };
        NavOutcome::Navigated(nav)
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) -> NavOutcome {
        let (column, row) = (mouse.column, mouse.row);
        let mode = self.input_mode;
        match mouse.kind {
            MouseEventKind::Moved => {
                // touch and pen have no hover
                if !mode.is_mouse() {
                    return NavOutcome::Ignored;
                }
                let next = self.hits.target_at(column, row).and_then(|t| t.hover());
                let mut changed = false;
                for transition in self.hover.update(next) {
                    changed |= self.apply_hover(transition, mode, now);
                }
                NavOutcome::from_changed(changed)
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let was_open = self.open_section();
                self.dispatch(WindowEvent::PointerDown {
                    x: column as f32,
                    y: row as f32,
                    mode,
                });
                let target = self.hits.target_at(column, row);
                if let Some(HitTarget::Item(item)) = &target
                    && let Some(section) = item.section()
                    && let Some(panel) = self.panel(&section)
                {
                    panel.pointer_down_anchor(mode);
                }
                self.pressed = target;
                NavOutcome::from_changed(was_open != self.open_section())
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let target = self.hits.target_at(column, row);
                let pressed = self.pressed.take();
                match target {
                    Some(target) if pressed.as_ref() == Some(&target) => self.click(target),
                    _ => NavOutcome::Ignored,
                }
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                let delta = if mouse.kind == MouseEventKind::ScrollUp {
                    -SCROLL_STEP
                } else {
                    SCROLL_STEP
                };
                let offset = (self.window.viewport().scroll_y + delta).max(0.0);
                NavOutcome::from_changed(self.dispatch(WindowEvent::Scroll { offset }))
            }
            _ => NavOutcome::Ignored,
        }
    }

    fn apply_hover(&self, transition: HoverTransition, mode: PointerMode, now: Instant) -> bool {
        match transition {
            HoverTransition::Leave(target) => self
                .panel(target.section())
                .is_some_and(|panel| panel.pointer_leave(mode, now)),
            HoverTransition::Enter(HoverTarget::Anchor(section)) => self
                .panel(&section)
                .is_some_and(|panel| panel.pointer_enter_anchor(mode)),
            HoverTransition::Enter(HoverTarget::Body(section)) => self
                .panel(&section)
                .is_some_and(|panel| panel.pointer_enter_panel(mode)),
        }
    }

    fn click(&mut self, target: HitTarget) -> NavOutcome {
        match target {
            HitTarget::Item(item) => match item.section() {
                Some(section) => {
                    self.focus = Some(item);
                    self.panel_cursor = None;
                    NavOutcome::from_changed(
                        self.panel(&section)
                            .is_some_and(|panel| panel.click_anchor()),
                    )
                }
                None => match item.href(self.locale) {
                    Some(href) => NavOutcome::Navigated(self.navigate(Navigation {
                        href,
                        replace: false,
                    })),
                    None => NavOutcome::Ignored,
                },
            },
            HitTarget::Entry(entry) => self.activate_entry(entry),
            HitTarget::Body(_) => NavOutcome::Ignored,
            HitTarget::MobileToggle => {
                self.mobile.toggle_menu();
                NavOutcome::Handled
            }
            HitTarget::Mobile(MobileRow::Accordion(section)) => {
                if section == SectionId::SERVICES {
                    self.mobile.toggle_services();
                } else {
                    self.mobile.toggle_gallery();
                }
                NavOutcome::Handled
            }
            HitTarget::Mobile(MobileRow::Link(item)) => match item.href(self.locale) {
                Some(href) => NavOutcome::Navigated(self.navigate(Navigation {
                    href,
                    replace: false,
                })),
                None => NavOutcome::Ignored,
            },
            HitTarget::Mobile(MobileRow::Entry(entry)) => {
                NavOutcome::Navigated(self.select_entry(&entry))
            }
        }
    }
}

impl std::fmt::Debug for Navbar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navbar")
            .field("locale", &self.locale)
            .field("pathname", &self.pathname)
            .field("open_section", &self.open_section())
            .field("mobile", &self.mobile)
            .field("focus", &self.focus)
            .finish()
    }
}
