//! Localized site navbar with floating dropdown panels.
//!
//! The panel machinery (`panel`, `bus`, `listeners`, `pointer`, `layout`) is
//! headless and unit-agnostic. `navbar`, `render` and the drivers put it on
//! a terminal with ratatui and crossterm.

pub mod bus;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod hover;
pub mod keybindings;
pub mod language;
pub mod layout;
pub mod listeners;
pub mod menu;
pub mod navbar;
pub mod panel;
pub mod pointer;
pub mod render;
pub mod routing;
pub mod state;
pub mod theme;
pub mod timer;
pub mod tracing_sub;
pub mod ui;
