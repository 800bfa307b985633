//! Event listener types for the headless tree.
//!
//! [§ 2.7 Interface EventTarget](https://dom.spec.whatwg.org/#interface-eventtarget)
//!
//! "An EventTarget object represents a target to which an event can be
//! dispatched when something has occurred."
//!
//! Handlers are plain shared closures taking an [`Event`] by reference. They
//! receive no tree access; a handler that needs to record something captures
//! its own shared state (typically an `Rc<RefCell<…>>`), keeping dispatch
//! free of re-entrant mutable borrows.

use std::fmt;
use std::rc::Rc;

use crate::NodeId;

/// [§ 2.2 Interface Event](https://dom.spec.whatwg.org/#interface-event)
///
/// "An Event object is simply named an event. It allows for signaling that
/// something has occurred."
///
/// Only the type and target are modeled; there is no propagation path,
/// cancellation, or default action in a headless tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// "Returns the type of event, e.g. 'click'."
    pub event_type: String,
    /// "Returns the object to which event is dispatched (its target)."
    pub target: NodeId,
}

/// A shared, callable event handler.
///
/// Cloning is cheap (reference-counted); the same handler may be registered
/// under several event types or on several nodes.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&Event)>);

impl EventHandler {
    /// Wrap a closure as a handler.
    pub fn new(handler: impl Fn(&Event) + 'static) -> Self {
        EventHandler(Rc::new(handler))
    }

    /// Invoke the handler with an event.
    pub fn call(&self, event: &Event) {
        (self.0)(event);
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventHandler")
    }
}

/// One entry in an element's event listener list.
///
/// [§ 2.7.1](https://dom.spec.whatwg.org/#concept-event-listener)
/// "An event listener can be used to observe a specific event and consists
/// of: type (a string)... callback..."
#[derive(Debug, Clone)]
pub struct EventListener {
    /// The event type this listener observes, e.g. `"click"`.
    pub event_type: String,
    /// The callback invoked on dispatch.
    pub handler: EventHandler,
}
