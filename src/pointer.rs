//! Pointer mode tracking.
//!
//! Hover-intent behavior (open on enter, debounced close on leave) only makes
//! sense for a mouse. Touch and pen have no lingering presence, so panels
//! driven by them toggle on explicit taps instead. `PointerModeTracker`
//! remembers which kind of device produced the most recent pointer event on
//! an interaction surface.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum PointerMode {
    #[default]
    Mouse,
    Touch,
    Pen,
}

impl PointerMode {
    /// Classify a raw pointer type string. Unknown or empty values are
    /// treated as a mouse.
    pub fn from_pointer_type(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "touch" => PointerMode::Touch,
            "pen" => PointerMode::Pen,
            _ => PointerMode::Mouse,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PointerMode::Mouse => "mouse",
            PointerMode::Touch => "touch",
            PointerMode::Pen => "pen",
        }
    }

    pub fn is_mouse(self) -> bool {
        self == PointerMode::Mouse
    }
}

impl fmt::Display for PointerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared record of the last pointer mode seen on one interaction surface.
///
/// Clones share the same slot, so every panel on a surface observes the same
/// mode.
#[derive(Debug, Clone, Default)]
pub struct PointerModeTracker {
    mode: Rc<Cell<PointerMode>>,
}

impl PointerModeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, mode: PointerMode) {
        self.mode.set(mode);
    }

    pub fn mode(&self) -> PointerMode {
        self.mode.get()
    }

    pub fn is_mouse(&self) -> bool {
        self.mode().is_mouse()
    }
}
