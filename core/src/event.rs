//! Event values and the handlers subscribed to them.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt::{self, Debug};

/// An event delivered by a host to a subscribed [`EventHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: String,
}

impl Event {
    /// Creates a new event of the given kind, for example `"click"`.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    /// Returns the event kind.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

/// A reference-counted event callback.
///
/// Handlers are compared by identity: two handlers are equal only when they are clones of
/// the same allocation. Reconciliation relies on this to leave unchanged subscriptions alone.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&Event)>);

impl EventHandler {
    /// Wraps a closure into a handler.
    pub fn new(handler: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    /// Invokes the handler.
    pub fn call(&self, event: &Event) {
        (self.0)(event);
    }

    /// Returns `true` if both handlers share the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventHandler({:p})", Rc::as_ptr(&self.0).cast::<()>())
    }
}

/// Shorthand for [`EventHandler::new`].
pub fn handler(f: impl Fn(&Event) + 'static) -> EventHandler {
    EventHandler::new(f)
}

/// Derives the subscription name from a handler prop key.
///
/// The `on` prefix is stripped and the rest lower-cased, so `onClick` becomes `click`.
/// Keys without the prefix are lower-cased as a whole.
#[must_use]
pub fn event_name(key: &str) -> String {
    key.strip_prefix("on").unwrap_or(key).to_lowercase()
}
