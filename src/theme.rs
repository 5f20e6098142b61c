use ratatui::style::{Color, Modifier, Style};

// Brand colors of the site header.
pub const ACCENT_RGB: (u8, u8, u8) = (0xEB, 0x5B, 0x00);
pub const ACCENT_ALT_RGB: (u8, u8, u8) = (0xFF, 0xCC, 0x00);
pub const HEADER_RGB: (u8, u8, u8) = (0x1A, 0x1A, 0x1A);

/// What the attached terminal can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    TrueColor,
    Indexed,
}

impl ColorDepth {
    /// Read `COLORTERM` the way most terminal apps do.
    pub fn detect() -> Self {
        Self::from_colorterm(std::env::var("COLORTERM").ok().as_deref())
    }

    pub fn from_colorterm(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase) {
            Some(v) if v.contains("truecolor") || v.contains("24bit") => ColorDepth::TrueColor,
            _ => ColorDepth::Indexed,
        }
    }

    pub fn color(self, rgb: (u8, u8, u8)) -> Color {
        match self {
            ColorDepth::TrueColor => Color::Rgb(rgb.0, rgb.1, rgb.2),
            ColorDepth::Indexed => Color::Indexed(xterm_cube_index(rgb)),
        }
    }
}

/// Nearest entry of the xterm 6x6x6 color cube (indices 16..=231).
fn xterm_cube_index((r, g, b): (u8, u8, u8)) -> u8 {
    let level = |v: u8| ((v as u16 * 5 + 127) / 255) as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

/// Styles used by the navbar renderer.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub accent_alt: Color,
    pub header_bg: Color,
}

impl Theme {
    pub fn new(depth: ColorDepth) -> Self {
        Self {
            accent: depth.color(ACCENT_RGB),
            accent_alt: depth.color(ACCENT_ALT_RGB),
            header_bg: depth.color(HEADER_RGB),
        }
    }

    /// Transparent until the page scrolls, solid afterwards.
    pub fn header(&self, scrolled: bool) -> Style {
        if scrolled {
            Style::default().bg(self.header_bg).fg(Color::White)
        } else {
            Style::default().fg(Color::White)
        }
    }

    pub fn logo(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn item(&self, active: bool, focused: bool, expanded: bool) -> Style {
        let mut style = Style::default().fg(Color::White);
        if active || expanded {
            style = style.fg(self.accent_alt);
        }
        if focused {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }

    pub fn panel(&self) -> Style {
        Style::default().bg(Color::Black).fg(Color::White)
    }

    pub fn panel_border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn group_label(&self) -> Style {
        Style::default()
            .fg(self.accent_alt)
            .add_modifier(Modifier::BOLD)
    }

    pub fn entry(&self, selected: bool) -> Style {
        if selected {
            Style::default().bg(self.accent).fg(Color::Black)
        } else {
            self.panel()
        }
    }

    pub fn entry_desc(&self) -> Style {
        Style::default().fg(Color::Gray)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ColorDepth::detect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorterm_detection() {
        assert_eq!(ColorDepth::from_colorterm(Some("truecolor")), ColorDepth::TrueColor);
        assert_eq!(ColorDepth::from_colorterm(Some("24BIT")), ColorDepth::TrueColor);
        assert_eq!(ColorDepth::from_colorterm(None), ColorDepth::Indexed);
    }

    #[test]
    fn accent_maps_per_depth() {
        assert_eq!(
            ColorDepth::TrueColor.color(ACCENT_RGB),
            Color::Rgb(0xEB, 0x5B, 0x00)
        );
        // 235 -> 5, 91 -> 2, 0 -> 0
        assert_eq!(ColorDepth::Indexed.color(ACCENT_RGB), Color::Indexed(208));
        assert_eq!(ColorDepth::Indexed.color((0, 0, 0)), Color::Indexed(16));
        assert_eq!(ColorDepth::Indexed.color((255, 255, 255)), Color::Indexed(231));
    }
}
