//! Locale-prefixed paths.
//!
//! The site serves `ar` (the default) and `en`. Every link the navbar builds
//! carries the locale as its first path segment.

use std::fmt;
use std::str::FromStr;

use crate::error::NavError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ar];

    pub fn code(self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }

    /// Name of the language in that language.
    pub fn native_label(self) -> &'static str {
        match self {
            Locale::Ar => "العربية",
            Locale::En => "English",
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Locale::Ar)
    }

    /// `/{locale}`
    pub fn root(self) -> String {
        format!("/{}", self.code())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Locale::Ar),
            "en" => Ok(Locale::En),
            other => Err(NavError::UnknownLocale(other.to_string())),
        }
    }
}

/// Locale named by the first path segment, if any.
pub fn locale_from_path(pathname: &str) -> Option<Locale> {
    pathname
        .split('/')
        .find(|seg| !seg.is_empty())
        .and_then(|seg| seg.parse().ok())
}

/// Locale for a request path. Bare paths fall back to the default locale.
pub fn resolve_locale(pathname: &str) -> Locale {
    locale_from_path(pathname).unwrap_or_default()
}

/// `/{locale}/{section}/{key}`
pub fn entry_path(locale: Locale, section: &str, key: &str) -> String {
    format!("/{}/{}/{}", locale.code(), section, key)
}

/// Rewrite `pathname` for `next`, keeping the rest of the path and the query.
///
/// A leading locale segment is replaced by the locale code. A bare path has
/// no locale segment, so the code is prepended instead.
pub fn locale_href(pathname: &str, query: &str, next: Locale) -> String {
    let mut segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();
    if locale_from_path(pathname).is_some() {
        segments[0] = next.code();
    } else {
        segments.insert(0, next.code());
    }
    let mut href = format!("/{}", segments.join("/"));
    let query = query.trim_start_matches('?');
    if !query.is_empty() {
        href.push('?');
        href.push_str(query);
    }
    href
}

/// `pathname` equals `href` or lives underneath it.
pub fn is_active(pathname: &str, href: &str) -> bool {
    if pathname.is_empty() {
        return false;
    }
    pathname == href
        || pathname
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Split a `path?query` string.
pub fn split_query(href: &str) -> (&str, &str) {
    match href.split_once('?') {
        Some((path, query)) => (path, query),
        None => (href, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_locales() {
        assert_eq!("EN".parse::<Locale>().ok(), Some(Locale::En));
        assert!(matches!(
            "fr".parse::<Locale>(),
            Err(NavError::UnknownLocale(code)) if code == "fr"
        ));
    }

    #[test]
    fn locale_href_rewrites_first_segment() {
        assert_eq!(
            locale_href("/en/services/websites", "", Locale::Ar),
            "/ar/services/websites"
        );
        assert_eq!(locale_href("/", "", Locale::En), "/en");
        assert_eq!(locale_href("", "a=1", Locale::Ar), "/ar?a=1");
        assert_eq!(
            locale_href("/ar/gallery", "?page=2", Locale::En),
            "/en/gallery?page=2"
        );
    }

    #[test]
    fn locale_href_prefixes_bare_paths() {
        assert_eq!(
            locale_href("/services/websites", "", Locale::Ar),
            "/ar/services/websites"
        );
        assert_eq!(locale_href("/about", "ref=nav", Locale::En), "/en/about?ref=nav");
        assert_eq!(locale_href("/english", "", Locale::Ar), "/ar/english");
    }

    #[test]
    fn active_matching() {
        assert!(is_active("/en/contact", "/en/contact"));
        assert!(is_active("/en/services/websites", "/en/services"));
        assert!(!is_active("/en/servicesx", "/en/services"));
        assert!(!is_active("", "/en"));
    }

    #[test]
    fn resolve_defaults_to_arabic() {
        assert_eq!(resolve_locale("/"), Locale::Ar);
        assert_eq!(resolve_locale("/about"), Locale::Ar);
        assert_eq!(resolve_locale("/en/about"), Locale::En);
    }

    #[test]
    fn entry_paths() {
        assert_eq!(
            entry_path(Locale::En, "gallery", "gallery-gift-items"),
            "/en/gallery/gallery-gift-items"
        );
        assert_eq!(split_query("/en?x=1"), ("/en", "x=1"));
        assert_eq!(split_query("/en"), ("/en", ""));
    }
}
