//! The boundary between the page behaviors and the document they enhance.
//!
//! Behaviors never touch `web_sys` directly. They go through [Host] and
//! [PageElement], implemented by the browser-backed `WebHost` and by the
//! headless [memory::MemoryHost].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use nameth::NamedEnumValues as _;
use nameth::nameth;

use crate::scroll::visibility::VisibilityOptions;

pub mod memory;
#[cfg(feature = "client")]
pub mod web;

/// The element operations used by the page behaviors.
///
/// Setters never fail: a host that can't apply a change logs it and moves on.
pub trait PageElement: Clone + PartialEq + std::fmt::Debug + 'static {
    fn attr(&self, name: &str) -> Option<String>;
    fn put_attr(&self, name: &str, value: &str);

    /// Upper-case tag name, e.g. `INPUT`.
    fn tag(&self) -> String;
    fn text(&self) -> String;
    fn put_text(&self, text: &str);

    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);

    /// Sets an inline style property.
    fn put_style(&self, property: &str, value: &str);

    fn set_disabled(&self, disabled: bool);
    fn is_disabled(&self) -> bool;
    fn put_value(&self, value: &str);

    /// Resets the fields of a form element.
    fn reset_fields(&self);

    /// Top edge relative to the viewport, like `getBoundingClientRect().top`.
    fn viewport_top(&self) -> f64;

    /// Rendered height, like `offsetHeight`.
    fn rendered_height(&self) -> f64;

    /// First descendant matching the selector.
    fn find(&self, selector: &str) -> Option<Self>;

    fn id(&self) -> Option<String> {
        self.attr("id").filter(|id| !id.is_empty())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    Scroll,
    DomContentLoaded,
}

impl EventKind {
    /// The DOM event type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::Scroll => "scroll",
            Self::DomContentLoaded => "DOMContentLoaded",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an event is listened to.
#[derive(Clone, Debug, PartialEq)]
pub enum EventSource<E> {
    Window,
    Document,
    Element(E),
}

/// The event passed to handlers.
#[derive(Debug)]
pub struct PageEvent {
    kind: EventKind,
    default_prevented: Cell<bool>,
}

impl PageEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            default_prevented: Cell::new(false),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type Handler = Rc<dyn Fn(&PageEvent)>;

/// Called with the target and whether it is currently intersecting.
pub type VisibilityCallback<E> = Rc<dyn Fn(&E, bool)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntervalId(pub i32);

/// The document, window and timers of the page.
pub trait Host: 'static {
    type Element: PageElement;

    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// True until the document has been parsed.
    fn is_loading(&self) -> bool;

    fn scroll_y(&self) -> f64;

    /// Smoothly scrolls the viewport to the given document offset.
    fn scroll_to(&self, top: f64);

    /// Shows a message to the user.
    fn notify(&self, message: &str);

    fn listen(
        &self,
        source: &EventSource<Self::Element>,
        kind: EventKind,
        handler: Handler,
    ) -> Result<(), HostError>;

    fn observe_visibility(
        &self,
        targets: &[Self::Element],
        options: &VisibilityOptions,
        callback: VisibilityCallback<Self::Element>,
    ) -> Result<(), HostError>;

    fn stop_observing(&self, target: &Self::Element);

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>)
    -> Result<(), HostError>;

    fn set_interval(
        &self,
        period: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<IntervalId, HostError>;

    fn clear_interval(&self, id: IntervalId);
}

/// Whether a `document.readyState` value means the document is still being parsed.
///
/// `interactive` and `complete` both come after `DOMContentLoaded`.
pub fn is_loading_state(ready_state: &str) -> bool {
    ready_state == "loading"
}

#[nameth]
#[derive(thiserror::Error, Debug)]
pub enum HostError {
    #[error("[{n}] Failed to listen to '{kind}': {message}", n = self.name())]
    Listen { kind: EventKind, message: String },

    #[error("[{n}] Failed to observe visibility: {0}", n = self.name())]
    Observe(String),

    #[error("[{n}] Failed to schedule a timer: {0}", n = self.name())]
    Timer(String),

    #[error("[{n}] Missing '{0}'", n = self.name())]
    Missing(&'static str),
}
