use ratatui::prelude::Rect;

use super::AnchorRect;
use crate::constants::{
    CELL_PANEL_GAP, CELL_PANEL_MIN_WIDTH, CELL_VIEWPORT_MARGIN, PANEL_GAP, PANEL_MIN_WIDTH,
    VIEWPORT_MARGIN,
};

/// Spacing constants applied when placing a floating panel under its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelMetrics {
    pub gap: f32,
    pub margin: f32,
    pub min_width: f32,
}

impl PanelMetrics {
    pub const fn pixels() -> Self {
        Self {
            gap: PANEL_GAP,
            margin: VIEWPORT_MARGIN,
            min_width: PANEL_MIN_WIDTH,
        }
    }

    pub const fn cells() -> Self {
        Self {
            gap: CELL_PANEL_GAP,
            margin: CELL_VIEWPORT_MARGIN,
            min_width: CELL_PANEL_MIN_WIDTH,
        }
    }
}

impl Default for PanelMetrics {
    fn default() -> Self {
        Self::pixels()
    }
}

/// Viewport-relative placement of an open panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPosition {
    pub top: f32,
    pub left: f32,
    pub width: f32,
}

impl PanelPosition {
    /// Snap to the terminal grid. Negative coordinates clamp to zero.
    pub fn to_cells(&self, height: u16) -> Rect {
        Rect {
            x: self.left.round().max(0.0) as u16,
            y: self.top.round().max(0.0) as u16,
            width: self.width.round().max(0.0) as u16,
            height,
        }
    }
}

/// Center a panel of `desired_width` under `anchor`, keeping it inside the
/// viewport horizontally.
///
/// When the viewport is too narrow for the clamp range to be non-empty the
/// lower bound wins, so `left` never drops below `metrics.margin`.
pub fn compute_position(
    anchor: &AnchorRect,
    desired_width: f32,
    viewport_width: f32,
    metrics: &PanelMetrics,
) -> PanelPosition {
    let cap = metrics
        .min_width
        .max(viewport_width - 2.0 * metrics.margin);
    let width = desired_width.min(cap).max(0.0);
    let max_left = viewport_width - width - metrics.margin;
    let left = (anchor.center_x() - width / 2.0)
        .min(max_left)
        .max(metrics.margin);
    PanelPosition {
        top: anchor.bottom + metrics.gap,
        left,
        width,
    }
}
