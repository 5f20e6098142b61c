//! Window-level listeners.
//!
//! `WindowEvents` stands in for the global event target that floating panels
//! attach to while they are open: resize and scroll (to reposition), pointer
//! down (outside-click dismissal) and key down (Escape). Registrations are
//! scoped: `listen` hands back a `ListenerGuard` and dropping the guard
//! removes the listener, so every exit path of an open panel releases what it
//! acquired.
//!
//! Handlers cannot cancel or consume an event, which makes every
//! registration passive.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::keybindings::PanelKey;
use crate::layout::AnchorRect;
use crate::pointer::PointerMode;

/// Current viewport metrics, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    Resize { width: f32, height: f32 },
    Scroll { offset: f32 },
    PointerDown { x: f32, y: f32, mode: PointerMode },
    KeyDown(PanelKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    Resize,
    Scroll,
    PointerDown,
    KeyDown,
}

impl WindowEvent {
    pub fn kind(&self) -> ListenerKind {
        match self {
            WindowEvent::Resize { .. } => ListenerKind::Resize,
            WindowEvent::Scroll { .. } => ListenerKind::Scroll,
            WindowEvent::PointerDown { .. } => ListenerKind::PointerDown,
            WindowEvent::KeyDown(_) => ListenerKind::KeyDown,
        }
    }
}

type WindowHandler = Rc<dyn Fn(&WindowEvent, Viewport)>;

struct Listener {
    kinds: Vec<ListenerKind>,
    handler: WindowHandler,
}

#[derive(Default)]
struct Registry {
    next_token: u64,
    listeners: BTreeMap<u64, Listener>,
}

/// Shared handle to the window-level event target.
#[derive(Clone, Default)]
pub struct WindowEvents {
    registry: Rc<RefCell<Registry>>,
    viewport: Rc<Cell<Viewport>>,
}

impl WindowEvents {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            registry: Rc::default(),
            viewport: Rc::new(Cell::new(viewport)),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    pub fn listen<F>(&self, kinds: &[ListenerKind], handler: F) -> ListenerGuard
    where
        F: Fn(&WindowEvent, Viewport) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let token = registry.next_token;
        registry.next_token = registry.next_token.wrapping_add(1);
        registry.listeners.insert(
            token,
            Listener {
                kinds: kinds.to_vec(),
                handler: Rc::new(handler),
            },
        );
        ListenerGuard {
            token,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Update the viewport from `event`, then deliver it to every listener
    /// registered for its kind. Returns the number of handlers invoked.
    pub fn dispatch(&self, event: &WindowEvent) -> usize {
        match *event {
            WindowEvent::Resize { width, height } => {
                let mut viewport = self.viewport.get();
                viewport.width = width;
                viewport.height = height;
                self.viewport.set(viewport);
            }
            WindowEvent::Scroll { offset } => {
                let mut viewport = self.viewport.get();
                viewport.scroll_y = offset.max(0.0);
                self.viewport.set(viewport);
            }
            _ => {}
        }
        let kind = event.kind();
        let handlers: Vec<WindowHandler> = self
            .registry
            .borrow()
            .listeners
            .values()
            .filter(|listener| listener.kinds.contains(&kind))
            .map(|listener| Rc::clone(&listener.handler))
            .collect();
        let viewport = self.viewport.get();
        for handler in &handlers {
            handler(event, viewport);
        }
        handlers.len()
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn listener_count_for(&self, kind: ListenerKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .values()
            .filter(|listener| listener.kinds.contains(&kind))
            .count()
    }
}

impl fmt::Debug for WindowEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowEvents")
            .field("viewport", &self.viewport.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Scoped registration on a `WindowEvents` target.
pub struct ListenerGuard {
    token: u64,
    registry: Weak<RefCell<Registry>>,
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("token", &self.token)
            .finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.remove(&self.token);
        }
    }
}

/// Which of a panel's elements a pointer-down landed in.
///
/// An element whose rect is unknown is never part of the path, so a panel
/// that has not reported its body yet treats every click as outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitPath {
    pub anchor: bool,
    pub panel: bool,
}

impl HitPath {
    pub fn resolve(x: f32, y: f32, anchor: Option<&AnchorRect>, panel: Option<&AnchorRect>) -> Self {
        Self {
            anchor: anchor.is_some_and(|rect| rect.contains(x, y)),
            panel: panel.is_some_and(|rect| rect.contains(x, y)),
        }
    }

    pub fn is_outside(&self) -> bool {
        !self.anchor && !self.panel
    }
}
