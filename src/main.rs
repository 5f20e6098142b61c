use std::io;

use clap::Parser;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use term_navmenu::catalog::{Catalog, Translate};
use term_navmenu::config::{Cli, Config};
use term_navmenu::drivers::{ConsoleDriver, ConsoleOutputDriver, OutputDriver};
use term_navmenu::event_loop::{ControlFlow, EventLoop};
use term_navmenu::menu::MenuData;
use term_navmenu::navbar::{NavOutcome, Navbar};
use term_navmenu::render::render_navbar;
use term_navmenu::theme::Theme;
use term_navmenu::ui::UiFrame;

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = Config::try_from(&cli)?;
    term_navmenu::tracing_sub::init(config.log_file.as_deref())?;
    let mut catalog = config.catalog()?;

    let mut output = ConsoleOutputDriver::new()?;
    let (width, height) = output.size()?;
    let mut navbar = Navbar::new(config.navbar_config(width, height), MenuData::builtin());
    let theme = Theme::default();
    tracing::info!(locale = %navbar.locale(), path = navbar.pathname(), "navbar started");

    output.enter()?;
    let mut event_loop = EventLoop::new(ConsoleDriver::new(), config.tick);
    let mut dirty = true;
    let result = event_loop.run(|_, event, now| {
        match event {
            None => dirty |= navbar.tick(now),
            Some(event) => {
                let locale = navbar.locale();
                match navbar.handle_event(&event, now) {
                    NavOutcome::Quit => return Ok(ControlFlow::Quit),
                    NavOutcome::Navigated(_) => {
                        if config.messages.is_none() && navbar.locale() != locale {
                            catalog = Catalog::builtin(navbar.locale())?;
                        }
                        dirty = true;
                    }
                    NavOutcome::Handled => dirty = true,
                    NavOutcome::Ignored => {}
                }
            }
        }
        if dirty {
            output.draw(|mut frame| {
                let area = frame.area();
                render_page(&navbar, &mut frame, area, &catalog);
                render_navbar(&mut navbar, &mut frame, area, &catalog, &theme);
            })?;
            dirty = false;
        }
        Ok(ControlFlow::Continue)
    });

    output.exit()?;
    result
}

/// Placeholder page under the header so scrolling and overlap are visible.
fn render_page(navbar: &Navbar, frame: &mut UiFrame<'_>, area: Rect, text: &dyn Translate) {
    let scroll = navbar.window().viewport().scroll_y.max(0.0) as u16;
    let body_style = Style::default().fg(Color::Gray);
    let help = navbar.bindings().help_line();
    let bottom = area.y.saturating_add(area.height);
    let mut y = area.y.saturating_add(2);
    let title = format!("{}  {}", navbar.pathname(), text.text("nav", "home"));
    for line in 0u16.. {
        if y >= bottom.saturating_sub(1) {
            break;
        }
        let index = line.saturating_add(scroll);
        let content = if index == 0 {
            title.clone()
        } else {
            format!("{:>4}  ·", index)
        };
        frame.set_string(area.x + 2, y, &content, body_style);
        y += 1;
    }
    frame.set_string(area.x + 1, bottom.saturating_sub(1), &help, Style::default().fg(Color::DarkGray));
}
