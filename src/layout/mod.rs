pub mod floating;

pub use floating::{PanelMetrics, PanelPosition, compute_position};

use ratatui::prelude::Rect;

/// Viewport-relative bounding box of an element, in layout units.
///
/// This plays the role of a DOM bounding client rect. The terminal front end
/// fills it from cell rectangles, one column or row per unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl AnchorRect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_cells(rect: Rect) -> Self {
        Self {
            left: rect.x as f32,
            top: rect.y as f32,
            right: rect.x as f32 + rect.width as f32,
            bottom: rect.y as f32 + rect.height as f32,
        }
    }

    pub fn width(&self) -> f32 {
        (self.right - self.left).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.bottom - self.top).max(0.0)
    }

    pub fn center_x(&self) -> f32 {
        self.left + self.width() / 2.0
    }

    /// Half-open containment test, matching `rect_contains` for cells.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        if self.width() <= 0.0 || self.height() <= 0.0 {
            return false;
        }
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_rect_from_cells() {
        let rect = Rect {
            x: 4,
            y: 0,
            width: 10,
            height: 1,
        };
        let anchor = AnchorRect::from_cells(rect);
        assert_eq!(anchor.left, 4.0);
        assert_eq!(anchor.right, 14.0);
        assert_eq!(anchor.bottom, 1.0);
        assert_eq!(anchor.center_x(), 9.0);
    }

    #[test]
    fn anchor_rect_contains_is_half_open() {
        let anchor = AnchorRect::new(10.0, 10.0, 20.0, 20.0);
        assert!(anchor.contains(10.0, 10.0));
        assert!(anchor.contains(19.5, 19.5));
        assert!(!anchor.contains(20.0, 15.0));
        assert!(!AnchorRect::new(5.0, 5.0, 5.0, 9.0).contains(5.0, 6.0));
    }

    #[test]
    fn rect_contains_edge_cases() {
        let r = Rect {
            x: 0,
            y: 0,
            width: 0,
            height: 5,
        };
        assert!(!rect_contains(r, 0, 0));
        let r2 = Rect {
            x: 1,
            y: 1,
            width: 3,
            height: 3,
        };
        assert!(rect_contains(r2, 1, 1));
        assert!(!rect_contains(r2, 4, 1));
    }
}
