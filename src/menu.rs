//! Static menu data for the navbar panels.
//!
//! Entries only carry keys. Labels and descriptions come from the message
//! catalog (`items.{key}.label`, `items.{key}.desc`) and the link target is
//! derived from the locale, the section and the key.

use crate::bus::SectionId;
use crate::routing::{Locale, entry_path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub section: SectionId,
    pub key: String,
}

impl MenuEntry {
    pub fn new(section: SectionId, key: impl Into<String>) -> Self {
        Self {
            section,
            key: key.into(),
        }
    }

    /// Catalog namespace holding this entry's strings.
    pub fn namespace(&self) -> &str {
        self.section.as_str()
    }

    pub fn label_key(&self) -> String {
        format!("items.{}.label", self.key)
    }

    pub fn desc_key(&self) -> String {
        format!("items.{}.desc", self.key)
    }

    pub fn href(&self, locale: Locale) -> String {
        entry_path(locale, self.section.as_str(), &self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGroup {
    pub group_key: String,
    pub items: Vec<MenuEntry>,
}

impl MenuGroup {
    pub fn label_key(&self) -> String {
        format!("groups.{}.label", self.group_key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuData {
    pub services: Vec<MenuGroup>,
    pub gallery: Vec<MenuEntry>,
}

const PRINT_GIFTS: [&str; 7] = [
    "digital-printing",
    "signage-printing",
    "laser-cutting-engraving",
    "acrylic-displays-stands",
    "billboards-cladding",
    "heat-press-printing",
    "embroidery",
];

const DESIGN_DIGITAL_MARKETING: [&str; 4] = [
    "graphic-design-video",
    "websites",
    "mobile-apps",
    "social-media-marketing",
];

const GALLERY_KEYS: [&str; 5] = [
    "gallery-digital-printing",
    "gallery-signage-printing",
    "gallery-laser-cut-engrave",
    "gallery-billboards-cladding",
    "gallery-gift-items",
];

impl MenuData {
    pub fn builtin() -> Self {
        let group = |group_key: &str, keys: &[&str]| MenuGroup {
            group_key: group_key.to_string(),
            items: keys
                .iter()
                .map(|key| MenuEntry::new(SectionId::SERVICES, *key))
                .collect(),
        };
        Self {
            services: vec![
                group("print-gifts", &PRINT_GIFTS),
                group("design-digital-marketing", &DESIGN_DIGITAL_MARKETING),
            ],
            gallery: GALLERY_KEYS
                .iter()
                .map(|key| MenuEntry::new(SectionId::GALLERY, *key))
                .collect(),
        }
    }

    /// Entries shown by the panel for `section`, in display order.
    pub fn entries(&self, section: &SectionId) -> Vec<&MenuEntry> {
        if *section == SectionId::SERVICES {
            self.services.iter().flat_map(|g| g.items.iter()).collect()
        } else if *section == SectionId::GALLERY {
            self.gallery.iter().collect()
        } else {
            Vec::new()
        }
    }

    pub fn find(&self, section: &SectionId, key: &str) -> Option<&MenuEntry> {
        self.entries(section).into_iter().find(|entry| entry.key == key)
    }
}

impl Default for MenuData {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_shape() {
        let data = MenuData::builtin();
        assert_eq!(data.services.len(), 2);
        assert_eq!(data.services[0].items.len(), 7);
        assert_eq!(data.services[1].items.len(), 4);
        assert_eq!(data.gallery.len(), 5);
        assert_eq!(data.entries(&SectionId::SERVICES).len(), 11);
        assert!(data.entries(&SectionId::LANGUAGE).is_empty());
    }

    #[test]
    fn entry_keys_and_paths() {
        let data = MenuData::builtin();
        let entry = data
            .find(&SectionId::SERVICES, "websites")
            .expect("websites entry");
        assert_eq!(entry.label_key(), "items.websites.label");
        assert_eq!(entry.desc_key(), "items.websites.desc");
        assert_eq!(entry.href(Locale::En), "/en/services/websites");
        assert_eq!(data.services[1].label_key(), "groups.design-digital-marketing.label");
        let gallery = &data.gallery[4];
        assert_eq!(gallery.href(Locale::Ar), "/ar/gallery/gallery-gift-items");
    }
}
