//! Exclusivity broadcast for floating panels.
//!
//! Panels that must never be open together subscribe to one `SectionBus`.
//! A panel publishes its own `SectionId` right before it opens and every
//! subscriber whose identity differs closes itself. No panel reads or writes
//! another panel's state; the bus only carries the identity token.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Identity of a panel within an exclusive set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(Cow<'static, str>);

impl SectionId {
    pub const SERVICES: SectionId = SectionId(Cow::Borrowed("services"));
    pub const GALLERY: SectionId = SectionId(Cow::Borrowed("gallery"));
    pub const LANGUAGE: SectionId = SectionId(Cow::Borrowed("language"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type SectionHandler = Rc<dyn Fn(&SectionId)>;

struct Subscriber {
    section: SectionId,
    handler: SectionHandler,
}

#[derive(Default)]
struct BusInner {
    next_token: u64,
    subscribers: BTreeMap<u64, Subscriber>,
}

/// Publish/subscribe channel carrying "this section is opening" events.
///
/// Cloning the bus yields another handle to the same channel.
#[derive(Clone, Default)]
pub struct SectionBus {
    inner: Rc<RefCell<BusInner>>,
}

impl SectionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every published section. The returned
    /// `Subscription` unsubscribes when dropped.
    pub fn subscribe<F>(&self, section: SectionId, handler: F) -> Subscription
    where
        F: Fn(&SectionId) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let token = inner.next_token;
        inner.next_token = inner.next_token.wrapping_add(1);
        inner.subscribers.insert(
            token,
            Subscriber {
                section: section.clone(),
                handler: Rc::new(handler),
            },
        );
        tracing::trace!(section = %section, token, "bus subscribe");
        Subscription {
            token,
            section,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `opened` to every subscriber, synchronously and in
    /// subscription order. Returns the number of handlers invoked.
    ///
    /// Handlers may drop their own or other subscriptions while the
    /// broadcast is in flight.
    pub fn publish(&self, opened: &SectionId) -> usize {
        let handlers: Vec<SectionHandler> = self
            .inner
            .borrow()
            .subscribers
            .values()
            .map(|sub| Rc::clone(&sub.handler))
            .collect();
        tracing::debug!(section = %opened, subscribers = handlers.len(), "open-section broadcast");
        for handler in &handlers {
            handler(opened);
        }
        handlers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    pub fn sections(&self) -> Vec<SectionId> {
        self.inner
            .borrow()
            .subscribers
            .values()
            .map(|sub| sub.section.clone())
            .collect()
    }
}

impl fmt::Debug for SectionBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionBus")
            .field("sections", &self.sections())
            .finish()
    }
}

/// Handle for one bus registration. Dropping it unsubscribes.
pub struct Subscription {
    token: u64,
    section: SectionId,
    bus: Weak<RefCell<BusInner>>,
}

impl Subscription {
    pub fn section(&self) -> &SectionId {
        &self.section
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("token", &self.token)
            .field("section", &self.section)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner.borrow_mut().subscribers.remove(&self.token);
            tracing::trace!(section = %self.section, token = self.token, "bus unsubscribe");
        }
    }
}
