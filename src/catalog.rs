//! Translation lookup.
//!
//! Message files are nested JSON objects grouped by namespace
//! (`nav`, `services`, `gallery`), looked up with dotted keys such as
//! `items.websites.label`. Missing keys fall back to `namespace.key` so a
//! gap in a catalog shows up on screen instead of failing the render.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::NavError;
use crate::routing::Locale;

const BUILTIN_EN: &str = include_str!("../assets/messages/en.json");
const BUILTIN_AR: &str = include_str!("../assets/messages/ar.json");

pub trait Translate {
    fn lookup(&self, namespace: &str, key: &str) -> Option<String>;

    fn text(&self, namespace: &str, key: &str) -> String {
        self.lookup(namespace, key)
            .unwrap_or_else(|| format!("{namespace}.{key}"))
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    root: Value,
}

impl Catalog {
    pub fn from_json_str(source: &str) -> Result<Self, NavError> {
        let root: Value = serde_json::from_str(source)?;
        if !root.is_object() {
            return Err(NavError::CatalogShape);
        }
        Ok(Self { root })
    }

    pub fn load(path: &Path) -> Result<Self, NavError> {
        let source = fs::read_to_string(path).map_err(|source| NavError::Catalog {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&source)
    }

    /// Messages shipped with the crate.
    pub fn builtin(locale: Locale) -> Result<Self, NavError> {
        match locale {
            Locale::En => Self::from_json_str(BUILTIN_EN),
            Locale::Ar => Self::from_json_str(BUILTIN_AR),
        }
    }
}

impl Translate for Catalog {
    fn lookup(&self, namespace: &str, key: &str) -> Option<String> {
        let mut node = self.root.get(namespace)?;
        for part in key.split('.') {
            node = node.get(part)?;
        }
        node.as_str().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Write;

    #[test]
    fn dotted_lookup_and_fallback() {
        let catalog = Catalog::from_json_str(indoc! {r#"
            {
              "nav": { "home": "Home" },
              "services": { "items": { "websites": { "label": "Websites" } } }
            }
        "#})
        .expect("valid catalog");
        assert_eq!(catalog.text("nav", "home"), "Home");
        assert_eq!(catalog.text("services", "items.websites.label"), "Websites");
        assert_eq!(catalog.text("services", "items.websites.desc"), "services.items.websites.desc");
        assert_eq!(catalog.lookup("services", "items"), None);
    }

    #[test]
    fn rejects_non_object_root() {
        assert!(matches!(
            Catalog::from_json_str("[1, 2]"),
            Err(NavError::CatalogShape)
        ));
        assert!(matches!(
            Catalog::from_json_str("{ nope"),
            Err(NavError::CatalogParse(_))
        ));
    }

    #[test]
    fn builtin_catalogs_cover_the_navbar() {
        for locale in Locale::ALL {
            let catalog = Catalog::builtin(locale).expect("builtin parses");
            for key in ["home", "services", "gallery", "contact", "about", "language"] {
                assert!(catalog.lookup("nav", key).is_some(), "{locale}: nav.{key}");
            }
            assert!(catalog.lookup("gallery", "items.gallery-gift-items.label").is_some());
        }
    }

    #[test]
    fn load_from_file_and_missing_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "nav": {{ "home": "Accueil" }} }}"#).expect("write catalog");
        let catalog = Catalog::load(file.path()).expect("load catalog");
        assert_eq!(catalog.text("nav", "home"), "Accueil");

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            Catalog::load(&missing),
            Err(NavError::Catalog { .. })
        ));
    }
}
