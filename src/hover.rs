//! Synthesized pointer enter/leave.
//!
//! Terminals only report pointer motion, so the navbar derives enter and
//! leave notifications by comparing the element under the pointer with the
//! one seen on the previous motion event.

use crate::bus::SectionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverTarget {
    Anchor(SectionId),
    Body(SectionId),
}

impl HoverTarget {
    pub fn section(&self) -> &SectionId {
        match self {
            HoverTarget::Anchor(section) | HoverTarget::Body(section) => section,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverTransition {
    Leave(HoverTarget),
    Enter(HoverTarget),
}

#[derive(Debug, Default)]
pub struct HoverTracker {
    current: Option<HoverTarget>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&HoverTarget> {
        self.current.as_ref()
    }

    /// Move the pointer onto `next`. Leave is always reported before enter.
    pub fn update(&mut self, next: Option<HoverTarget>) -> Vec<HoverTransition> {
        if self.current == next {
            return Vec::new();
        }
        let mut transitions = Vec::with_capacity(2);
        if let Some(prev) = self.current.take() {
            transitions.push(HoverTransition::Leave(prev));
        }
        if let Some(next) = next {
            transitions.push(HoverTransition::Enter(next.clone()));
            self.current = Some(next);
        }
        transitions
    }

    /// Forget the hovered element without reporting a leave, e.g. after the
    /// layout changed underneath the pointer.
    pub fn reset(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_leave_before_enter() {
        let mut hover = HoverTracker::new();
        let anchor = HoverTarget::Anchor(SectionId::SERVICES);
        let body = HoverTarget::Body(SectionId::SERVICES);
        assert_eq!(
            hover.update(Some(anchor.clone())),
            vec![HoverTransition::Enter(anchor.clone())]
        );
        assert!(hover.update(Some(anchor.clone())).is_empty());
        assert_eq!(
            hover.update(Some(body.clone())),
            vec![
                HoverTransition::Leave(anchor),
                HoverTransition::Enter(body.clone())
            ]
        );
        assert_eq!(hover.update(None), vec![HoverTransition::Leave(body)]);
        assert!(hover.current().is_none());
    }

    #[test]
    fn reset_is_silent() {
        let mut hover = HoverTracker::new();
        hover.update(Some(HoverTarget::Anchor(SectionId::GALLERY)));
        hover.reset();
        assert!(hover.update(None).is_empty());
    }
}
