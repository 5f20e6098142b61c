//! Shared crate-wide constants.

use std::time::Duration;

/// Vertical distance between the bottom edge of an anchor and the top edge
/// of its floating panel.
pub const PANEL_GAP: f32 = 10.0;

/// Minimum distance a floating panel keeps from the left and right viewport
/// edges.
pub const VIEWPORT_MARGIN: f32 = 12.0;

/// Floor applied to the viewport-derived width cap of a floating panel.
///
/// The final width is `min(desired, max(PANEL_MIN_WIDTH, viewport - 2 * margin))`,
/// so on narrow viewports a panel is never squeezed below this value by the
/// cap itself (the desired width still wins when it is smaller).
pub const PANEL_MIN_WIDTH: f32 = 240.0;

/// Desired width of the navbar's services and gallery panels.
pub const SECTION_PANEL_WIDTH: f32 = 760.0;

/// Desired width of the language switcher panel.
pub const LANGUAGE_PANEL_WIDTH: f32 = 150.0;

/// Hover-close delay for the navbar section panels.
pub const SECTION_HOVER_CLOSE_DELAY: Duration = Duration::from_millis(140);

/// Hover-close delay for the language switcher panel.
pub const LANGUAGE_HOVER_CLOSE_DELAY: Duration = Duration::from_millis(120);

/// Scroll offset after which the header switches to its "scrolled" style.
pub const SCROLL_TRANSPARENCY_THRESHOLD: f32 = 16.0;

/// Cell-scale metrics used by the terminal front end.
///
/// One terminal column maps to one layout unit, so the pixel defaults above
/// would push every panel off screen.
pub const CELL_PANEL_GAP: f32 = 0.0;
pub const CELL_VIEWPORT_MARGIN: f32 = 1.0;
pub const CELL_PANEL_MIN_WIDTH: f32 = 20.0;
pub const CELL_SECTION_PANEL_WIDTH: f32 = 64.0;
pub const CELL_LANGUAGE_PANEL_WIDTH: f32 = 24.0;

/// Viewports narrower than this many columns render the stacked mobile menu
/// instead of the desktop row.
pub const MOBILE_BREAKPOINT_COLUMNS: u16 = 72;
