//! Draws the navbar into a `UiFrame` and records the hit regions the next
//! round of input is resolved against.
//!
//! Rendering also feeds layout back into the panels: each trigger's cell
//! rectangle becomes its anchor and each drawn panel body is reported with
//! `set_body`, so outside-pointer detection sees what is on screen.

use ratatui::layout::Rect;
use ratatui::widgets::{Block, BorderType, Borders, Clear};

use crate::bus::SectionId;
use crate::catalog::Translate;
use crate::constants::MOBILE_BREAKPOINT_COLUMNS;
use crate::layout::AnchorRect;
use crate::menu::MenuEntry;
use crate::navbar::{EntryTarget, MobileRow, NavItem, Navbar};
use crate::routing::Locale;
use crate::theme::Theme;
use crate::ui::{UiFrame, text_width};

const LOGO: &str = "◆";
const CARET_CLOSED: &str = "▾";
const CARET_OPEN: &str = "▴";
const MOBILE_TOGGLE: &str = "☰";
const MOBILE_CLOSE: &str = "✕";

/// A row of a panel body.
enum BodyRow {
    Group(String),
    Entry(EntryTarget, String, Option<String>),
}

pub fn render_navbar(
    navbar: &mut Navbar,
    frame: &mut UiFrame<'_>,
    area: Rect,
    text: &dyn Translate,
    theme: &Theme,
) {
    navbar.hits.clear();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let header = Rect { height: 1, ..area };
    frame.fill(header, theme.header(navbar.scroll().scrolled()));
    if area.width < MOBILE_BREAKPOINT_COLUMNS {
        // no floating panels on narrow terminals
        navbar.collapse_panels();
        for panel in navbar.panels() {
            panel.set_anchor(None);
        }
        render_mobile(navbar, frame, area, text, theme);
    } else {
        render_desktop_row(navbar, frame, header, text, theme);
        render_open_panel(navbar, frame, area, text, theme);
    }
}

fn item_label(navbar: &Navbar, item: NavItem, text: &dyn Translate) -> String {
    let label = match item {
        NavItem::Language => navbar.locale().native_label().to_string(),
        _ => text.text("nav", item.label_key()),
    };
    match item.section() {
        Some(section) => {
            let open = navbar.panel(&section).is_some_and(|p| p.is_open());
            let caret = if open { CARET_OPEN } else { CARET_CLOSED };
            format!("{label} {caret}")
        }
        None => label,
    }
}

/// Mirror `rect` inside `row` for right-to-left locales.
fn mirror(rect: Rect, row: Rect, rtl: bool) -> Rect {
    if !rtl {
        return rect;
    }
    let offset = rect.x.saturating_sub(row.x);
    let x = row
        .x
        .saturating_add(row.width)
        .saturating_sub(offset)
        .saturating_sub(rect.width);
    Rect { x, ..rect }
}

fn render_desktop_row(
    navbar: &mut Navbar,
    frame: &mut UiFrame<'_>,
    row: Rect,
    text: &dyn Translate,
    theme: &Theme,
) {
    let rtl = navbar.locale().is_rtl();
    let logo = mirror(Rect::new(row.x + 1, row.y, text_width(LOGO), 1), row, rtl);
    frame.set_string(logo.x, logo.y, LOGO, theme.logo());

    let mut x = row.x + 4;
    let right_edge = row.x.saturating_add(row.width);
    for item in NavItem::ORDER {
        let label = item_label(navbar, item, text);
        let width = text_width(&label) + 2;
        let slot_x = if item == NavItem::Language {
            right_edge.saturating_sub(width + 1)
        } else {
            let slot_x = x;
            x = x.saturating_add(width);
            slot_x
        };
        let slot = mirror(Rect::new(slot_x, row.y, width, 1), row, rtl);
        let expanded = item
            .section()
            .and_then(|section| navbar.panel(&section).map(|p| p.is_open()))
            .unwrap_or(false);
        let style = theme.item(navbar.is_active(item), navbar.focus() == Some(item), expanded);
        frame.fill(slot, style);
        frame.set_string(slot.x + 1, slot.y, &label, style);
        if let Some(section) = item.section()
            && let Some(panel) = navbar.panel(&section)
        {
            panel.set_anchor(Some(AnchorRect::from_cells(slot)));
        }
        navbar.hits.items.push((item, slot));
    }
}

fn body_rows(navbar: &Navbar, section: &SectionId, text: &dyn Translate) -> Vec<BodyRow> {
    let entry_row = |entry: &MenuEntry| {
        BodyRow::Entry(
            EntryTarget::Menu(entry.clone()),
            text.text(entry.namespace(), &entry.label_key()),
            Some(text.text(entry.namespace(), &entry.desc_key())),
        )
    };
    if *section == SectionId::SERVICES {
        let mut rows = Vec::new();
        for group in &navbar.menu().services {
            rows.push(BodyRow::Group(text.text("services", &group.label_key())));
            rows.extend(group.items.iter().map(entry_row));
        }
        rows
    } else if *section == SectionId::GALLERY {
        navbar.menu().gallery.iter().map(entry_row).collect()
    } else {
        navbar
            .language()
            .entries(navbar.locale(), navbar.pathname(), navbar.query())
            .into_iter()
            .map(|entry| {
                let mark = if entry.active { "● " } else { "○ " };
                BodyRow::Entry(
                    EntryTarget::Language(entry.locale),
                    format!("{mark}{}", entry.label),
                    None,
                )
            })
            .collect()
    }
}

fn render_open_panel(
    navbar: &mut Navbar,
    frame: &mut UiFrame<'_>,
    area: Rect,
    text: &dyn Translate,
    theme: &Theme,
) {
    let Some(section) = navbar.open_section() else {
        return;
    };
    let Some(position) = navbar.panel(&section).and_then(|p| p.position()) else {
        return;
    };
    let rows = body_rows(navbar, &section, text);
    let height = u16::try_from(rows.len()).unwrap_or(u16::MAX).saturating_add(2);
    let rect = position.to_cells(height).intersection(area);
    if rect.width < 3 || rect.height < 3 {
        return;
    }
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.panel_border())
        .style(theme.panel());
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let cursor = match navbar.focus().and_then(NavItem::section) {
        Some(focused) if focused == section => navbar.panel_cursor(),
        _ => None,
    };
    let mut entry_index = 0usize;
    for (offset, row) in rows.into_iter().enumerate() {
        let y = inner.y.saturating_add(offset as u16);
        if y >= inner.y.saturating_add(inner.height) {
            break;
        }
        let line = Rect::new(inner.x, y, inner.width, 1);
        match row {
            BodyRow::Group(label) => {
                frame.set_string(line.x, y, &label, theme.group_label());
            }
            BodyRow::Entry(target, label, desc) => {
                let style = theme.entry(cursor == Some(entry_index));
                frame.fill(line, style);
                let written = frame.set_string(line.x + 1, y, &label, style);
                if let Some(desc) = desc {
                    let x = line.x + 1 + written + 2;
                    if x < line.x.saturating_add(line.width) {
                        frame.set_string(x, y, &desc, theme.entry_desc());
                    }
                }
                navbar.hits.entries.push((target, line));
                entry_index += 1;
            }
        }
    }
    navbar.hits.bodies.push((section.clone(), rect));
    if let Some(panel) = navbar.panel(&section) {
        panel.set_body(Some(AnchorRect::from_cells(rect)));
    }
}

fn render_mobile(
    navbar: &mut Navbar,
    frame: &mut UiFrame<'_>,
    area: Rect,
    text: &dyn Translate,
    theme: &Theme,
) {
    frame.set_string(area.x + 1, area.y, LOGO, theme.logo());
    let glyph = if navbar.mobile().open() {
        MOBILE_CLOSE
    } else {
        MOBILE_TOGGLE
    };
    let toggle = Rect::new(
        area.x.saturating_add(area.width).saturating_sub(4),
        area.y,
        3,
        1,
    );
    frame.set_string(toggle.x + 1, toggle.y, glyph, theme.logo());
    navbar.hits.mobile_toggle = Some(toggle);
    if !navbar.mobile().open() {
        return;
    }

    let mut rows: Vec<(MobileRow, String)> = Vec::new();
    for item in NavItem::ORDER {
        match item.section() {
            Some(section) if section == SectionId::LANGUAGE => {}
            Some(section) => {
                let expanded = if section == SectionId::SERVICES {
                    navbar.mobile().services_open()
                } else {
                    navbar.mobile().gallery_open()
                };
                let caret = if expanded { CARET_OPEN } else { CARET_CLOSED };
                let label = text.text("nav", item.label_key());
                rows.push((MobileRow::Accordion(section.clone()), format!("{label} {caret}")));
                if expanded {
                    for entry in navbar.menu().entries(&section) {
                        let label = text.text(entry.namespace(), &entry.label_key());
                        rows.push((MobileRow::Entry(entry.clone()), format!("  {label}")));
                    }
                }
            }
            None => rows.push((MobileRow::Link(item), text.text("nav", item.label_key()))),
        }
    }

    let list_top = area.y.saturating_add(1);
    let bottom = area.y.saturating_add(area.height);
    let mut y = list_top;
    for (row, label) in rows {
        if y >= bottom {
            return;
        }
        let line = Rect::new(area.x, y, area.width, 1);
        let active = matches!(row, MobileRow::Link(item) if navbar.is_active(item));
        let style = theme.item(active, false, false);
        frame.fill(line, theme.panel());
        frame.set_string(line.x + 1, y, &label, style);
        navbar.hits.mobile_rows.push((row, line));
        y += 1;
    }

    // language choices close the list
    let mut x = area.x + 1;
    if y < bottom {
        frame.fill(Rect::new(area.x, y, area.width, 1), theme.panel());
        for locale in Locale::ALL {
            let label = locale.native_label();
            let width = text_width(label) + 2;
            let slot = Rect::new(x, y, width, 1);
            let style = theme.entry(locale == navbar.locale());
            frame.fill(slot, style);
            frame.set_string(slot.x + 1, y, label, style);
            navbar.hits.entries.push((EntryTarget::Language(locale), slot));
            x = x.saturating_add(width + 1);
        }
    }
}
