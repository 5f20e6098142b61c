use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::catalog::Catalog;
use crate::error::NavError;
use crate::listeners::Viewport;
use crate::navbar::{NavbarConfig, PanelScale};
use crate::pointer::PointerMode;
use crate::routing::{Locale, locale_href, resolve_locale, split_query};

#[derive(Parser, Debug)]
#[command(
    name = "term-navmenu",
    version = env!("CARGO_PKG_VERSION"),
    about = "Localized site navbar with floating dropdown panels, in the terminal"
)]
pub struct Cli {
    /// Locale to start in. Overrides the first segment of --path.
    #[arg(short = 'l', long = "locale", value_name = "CODE")]
    pub locale: Option<String>,

    /// Current page, optionally with a query string.
    #[arg(short = 'p', long = "path", value_name = "PATH", default_value = "/")]
    pub path: String,

    /// JSON message catalog to use instead of the built-in one.
    #[arg(short = 'm', long = "messages", value_name = "FILE")]
    pub messages: Option<PathBuf>,

    /// How terminal mouse input is classified.
    #[arg(long = "pointer", value_enum, default_value_t = PointerMode::Mouse)]
    pub pointer: PointerMode,

    /// Write debug logs here. Logging is off when unset.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Poll interval; hover-close timers fire on these ticks.
    #[arg(long = "tick-ms", value_name = "MS", default_value_t = 16)]
    pub tick_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub locale: Locale,
    pub pathname: String,
    pub query: String,
    pub messages: Option<PathBuf>,
    pub pointer: PointerMode,
    pub log_file: Option<PathBuf>,
    pub tick: Duration,
}

impl TryFrom<&Cli> for Config {
    type Error = NavError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if !(1..=1000).contains(&cli.tick_ms) {
            return Err(NavError::Config(
                "tick-ms must be between 1 and 1000".to_string(),
            ));
        }
        let (path, query) = split_query(cli.path.trim());
        if !path.is_empty() && !path.starts_with('/') {
            return Err(NavError::Config(format!(
                "path `{path}` must start with `/`"
            )));
        }
        let (locale, pathname) = match &cli.locale {
            Some(code) => {
                let locale: Locale = code.parse()?;
                (locale, locale_href(path, "", locale))
            }
            None => {
                let locale = resolve_locale(path);
                (locale, locale_href(path, "", locale))
            }
        };
        Ok(Self {
            locale,
            pathname,
            query: query.to_string(),
            messages: cli.messages.clone(),
            pointer: cli.pointer,
            log_file: cli.log_file.clone(),
            tick: Duration::from_millis(cli.tick_ms),
        })
    }
}

impl Config {
    /// Catalog from `--messages`, else the built-in one for the locale.
    pub fn catalog(&self) -> Result<Catalog, NavError> {
        match &self.messages {
            Some(path) => Catalog::load(path),
            None => Catalog::builtin(self.locale),
        }
    }

    /// Navbar settings for a terminal of `width` x `height` cells.
    pub fn navbar_config(&self, width: u16, height: u16) -> NavbarConfig {
        NavbarConfig {
            pathname: self.pathname.clone(),
            query: self.query.clone(),
            scale: PanelScale::Cells,
            input_mode: self.pointer,
            viewport: Viewport {
                width: width as f32,
                height: height as f32,
                scroll_y: 0.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("term-navmenu").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn defaults_resolve_to_arabic_root() {
        let config = Config::try_from(&parse(&[])).expect("valid config");
        assert_eq!(config.locale, Locale::Ar);
        assert_eq!(config.pathname, "/ar");
        assert_eq!(config.query, "");
        assert_eq!(config.pointer, PointerMode::Mouse);
        assert_eq!(config.tick, Duration::from_millis(16));
    }

    #[test]
    fn locale_flag_rewrites_path() {
        let cli = parse(&["--locale", "en", "--path", "/ar/gallery?page=2", "--pointer", "touch"]);
        let config = Config::try_from(&cli).expect("valid config");
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.pathname, "/en/gallery");
        assert_eq!(config.query, "page=2");
        assert_eq!(config.pointer, PointerMode::Touch);
        let nav = config.navbar_config(80, 24);
        assert_eq!(nav.scale, PanelScale::Cells);
        assert_eq!(nav.viewport.width, 80.0);
    }

    #[test]
    fn bare_paths_keep_every_segment() {
        let config =
            Config::try_from(&parse(&["--path", "/services/websites"])).expect("valid config");
        assert_eq!(config.locale, Locale::Ar);
        assert_eq!(config.pathname, "/ar/services/websites");

        let cli = parse(&["--locale", "en", "--path", "/about?ref=nav"]);
        let config = Config::try_from(&cli).expect("valid config");
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.pathname, "/en/about");
        assert_eq!(config.query, "ref=nav");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::try_from(&parse(&["--locale", "fr"])),
            Err(NavError::UnknownLocale(_))
        ));
        assert!(matches!(
            Config::try_from(&parse(&["--tick-ms", "0"])),
            Err(NavError::Config(_))
        ));
        assert!(matches!(
            Config::try_from(&parse(&["--path", "en/about"])),
            Err(NavError::Config(_))
        ));
    }

    #[test]
    fn messages_file_overrides_builtin() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("messages.json");
        std::fs::write(&path, r#"{ "nav": { "home": "Start" } }"#).expect("write catalog");
        let cli = parse(&["--messages", path.to_str().expect("utf-8 path")]);
        let config = Config::try_from(&cli).expect("valid config");
        let catalog = config.catalog().expect("catalog loads");
        use crate::catalog::Translate;
        assert_eq!(catalog.text("nav", "home"), "Start");
    }
}
