//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to the
//! visible area.
//!
//! Panels are positioned against the viewport, and the floating body may be
//! computed partly past the bottom edge on short terminals. Every draw call
//! made through `UiFrame` is clipped to the buffer so a bad rectangle never
//! panics inside ratatui.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

/// Wrapper around `ratatui::Frame` that clamps drawing to the visible area.
pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer, for offscreen
    /// rendering in tests.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Paint `style` over every cell of `area`.
    pub fn fill(&mut self, area: Rect, style: Style) {
        if let Some(clipped) = self.clip_rect(area) {
            self.buffer.set_style(clipped, style);
        }
    }

    /// Write `text` at `(x, y)`, truncated at the frame edge. Returns the
    /// number of columns written.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        safe_set_string(self.buffer, self.area, x, y, text, style)
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) -> u16 {
    if bounds.width == 0 || bounds.height == 0 {
        return 0;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return 0;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return 0;
    }
    let text = truncate_to_width(text, available as usize);
    let (end, _) = buffer.set_stringn(x, y, &text, available as usize, style);
    end.saturating_sub(x)
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

/// Display width in cells, one per char.
pub(crate) fn text_width(value: &str) -> u16 {
    u16::try_from(value.chars().count()).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::{Color, Style};

    #[test]
    fn truncate_to_width_short_and_long() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
        assert_eq!(text_width("English"), 7);
    }

    #[test]
    fn safe_set_string_writes_within_bounds() {
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 2,
        };
        let mut buf = Buffer::empty(bounds);
        assert_eq!(
            safe_set_string(&mut buf, bounds, 1, 0, "hello", Style::default()),
            5
        );
        let cell = buf.cell_mut((1, 0)).expect("cell present");
        let first = cell.symbol().chars().next().unwrap();
        assert_eq!(first, 'h');

        // outside bounds should be ignored (no panic)
        assert_eq!(
            safe_set_string(&mut buf, bounds, 100, 0, "x", Style::default()),
            0
        );
        assert_eq!(
            safe_set_string(&mut buf, bounds, 8, 1, "long", Style::default()),
            2
        );
    }

    #[test]
    fn set_string_width_places_following_text() {
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        let written = ui.set_string(1, 0, "Logo", Style::default());
        assert_eq!(written, 4);
        let tail = ui.set_string(1 + written + 2, 0, "brand", Style::default());
        assert_eq!(tail, 5);
        assert_eq!(buf.cell((7, 0)).unwrap().symbol(), "b");
        assert_eq!(buf.cell((6, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn render_widget_clips_to_frame_area() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 5,
            height: 3,
        };
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);

        struct FillWidget;
        impl Widget for FillWidget {
            fn render(self, area: Rect, buf: &mut Buffer) {
                for y in area.y..area.y.saturating_add(area.height) {
                    for x in area.x..area.x.saturating_add(area.width) {
                        if let Some(cell) = buf.cell_mut((x, y)) {
                            cell.set_symbol("A");
                        }
                    }
                }
            }
        }

        // Request an area that partially lies outside the right edge.
        ui.render_widget(
            FillWidget,
            Rect {
                x: 3,
                y: 1,
                width: 5,
                height: 2,
            },
        );

        let inside = buf.cell_mut((3, 1)).expect("cell present");
        assert!(inside.symbol().starts_with('A'));
        let outside = buf.cell_mut((2, 1)).expect("cell present");
        assert!(!outside.symbol().starts_with('A'));
    }

    #[test]
    fn fill_ignores_offscreen_area() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        let style = Style::default().bg(Color::Blue);
        ui.fill(Rect::new(10, 10, 5, 5), style);
        ui.fill(Rect::new(2, 1, 5, 5), style);
        assert_eq!(buf.cell((3, 1)).unwrap().bg, Color::Blue);
        assert_eq!(buf.cell((1, 1)).unwrap().bg, Color::Reset);
    }
}
