use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys a floating panel trigger reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKey {
    Enter,
    Space,
    ArrowDown,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    // Focus ring over the navbar items
    FocusNext,
    FocusPrev,
    // Focused trigger
    Activate,
    OpenPanel,
    Dismiss,
    // Page
    ToggleMobileMenu,
    ScrollUp,
    ScrollDown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "quit",
            Action::FocusNext => "focus",
            Action::FocusPrev => "focus back",
            Action::Activate => "open/select",
            Action::OpenPanel => "next",
            Action::Dismiss => "close",
            Action::ToggleMobileMenu => "menu",
            Action::ScrollUp => "scroll up",
            Action::ScrollDown => "scroll down",
        };
        write!(f, "{}", s)
    }
}

impl Action {
    /// Actions listed in the footer hint, in display order.
    pub const HELP_ORDER: [Action; 6] = [
        Action::FocusNext,
        Action::Activate,
        Action::OpenPanel,
        Action::Dismiss,
        Action::ToggleMobileMenu,
        Action::Quit,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::NONE));
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        kb.add(FocusNext, KeyCombo::new(KeyCode::Tab, KeyModifiers::NONE));
        kb.add(
            FocusPrev,
            KeyCombo::new(KeyCode::BackTab, KeyModifiers::NONE),
        );
        kb.add(Activate, KeyCombo::new(KeyCode::Enter, KeyModifiers::NONE));
        kb.add(
            Activate,
            KeyCombo::new(KeyCode::Char(' '), KeyModifiers::NONE),
        );
        kb.add(OpenPanel, KeyCombo::new(KeyCode::Down, KeyModifiers::NONE));
        kb.add(Dismiss, KeyCombo::new(KeyCode::Esc, KeyModifiers::NONE));
        kb.add(
            ToggleMobileMenu,
            KeyCombo::new(KeyCode::Char('m'), KeyModifiers::NONE),
        );
        kb.add(ScrollUp, KeyCombo::new(KeyCode::PageUp, KeyModifiers::NONE));
        kb.add(
            ScrollDown,
            KeyCombo::new(KeyCode::PageDown, KeyModifiers::NONE),
        );
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    /// Resolve a key to its action. Default bindings never share a combo
    /// between two actions, so the result does not depend on map order.
    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        self.map
            .iter()
            .find(|(_, list)| list.iter().any(|c| c.matches(key)))
            .map(|(act, _)| *act)
    }

    /// Footer hint built from the first combo bound to each action in
    /// `Action::HELP_ORDER`. Unbound actions are skipped.
    pub fn help_line(&self) -> String {
        Action::HELP_ORDER
            .iter()
            .filter_map(|act| {
                let combo = self.map.get(act)?.first()?;
                Some(format!("{combo} {act}"))
            })
            .collect::<Vec<_>>()
            .join(" · ")
    }
}
