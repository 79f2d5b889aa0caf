//! A headless document with a virtual clock.
//!
//! Used to run the page controller without a browser: tests build the
//! document, simulate clicks, submits and scrolls, and move time forward with
//! [MemoryHost::advance].

use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;
use std::rc::Weak;
use std::time::Duration;

use tracing::debug;
use tracing::warn;

use self::clock::VirtualClock;
use self::selector::SelectorList;
use super::EventKind;
use super::EventSource;
use super::Handler;
use super::Host;
use super::HostError;
use super::IntervalId;
use super::PageElement;
use super::PageEvent;
use super::VisibilityCallback;
use crate::scroll::visibility::VisibilityOptions;

mod clock;
pub mod selector;

const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.;

#[derive(Clone)]
pub struct MemoryHost(Rc<MemoryHostInner>);

pub struct MemoryHostInner {
    window: Rc<WindowState>,
    root: MemoryElement,
    body: MemoryElement,
    loading: Cell<bool>,
    clock: VirtualClock,
    listeners: RefCell<Vec<(EventSource<MemoryElement>, EventKind, Handler)>>,
    observers: RefCell<Vec<Observer>>,
    notifications: RefCell<Vec<String>>,
    scroll_requests: RefCell<Vec<f64>>,
}

struct WindowState {
    scroll_y: Cell<f64>,
    viewport_height: Cell<f64>,
}

struct Observer {
    options: VisibilityOptions,
    targets: Vec<(MemoryElement, bool)>,
    callback: VisibilityCallback<MemoryElement>,
}

impl std::ops::Deref for MemoryHost {
    type Target = MemoryHostInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        let window = Rc::new(WindowState {
            scroll_y: Cell::new(0.),
            viewport_height: Cell::new(DEFAULT_VIEWPORT_HEIGHT),
        });
        let root = MemoryElement::new("html", &window);
        let body = root.child(MemoryElement::new("body", &window));
        Self(Rc::new(MemoryHostInner {
            window,
            root,
            body,
            loading: Cell::new(false),
            clock: VirtualClock::default(),
            listeners: RefCell::default(),
            observers: RefCell::default(),
            notifications: RefCell::default(),
            scroll_requests: RefCell::default(),
        }))
    }

    /// A detached element, to be appended with [MemoryElement::child].
    pub fn create(&self, tag: &str) -> MemoryElement {
        MemoryElement::new(tag, &self.window)
    }

    pub fn body(&self) -> MemoryElement {
        self.body.clone()
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    /// Marks the document as parsed and fires `DOMContentLoaded`.
    pub fn finish_loading(&self) -> PageEvent {
        self.loading.set(false);
        self.dispatch(&EventSource::Document, EventKind::DomContentLoaded)
    }

    pub fn set_viewport_height(&self, height: f64) {
        self.window.viewport_height.set(height);
        self.refresh_visibility();
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Runs the timers falling due within the given duration.
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    pub fn pending_timers(&self) -> usize {
        self.clock.pending()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.borrow().clone()
    }

    /// Offsets passed to [Host::scroll_to].
    pub fn scroll_requests(&self) -> Vec<f64> {
        self.scroll_requests.borrow().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Dispatches an event the way the browser would.
    ///
    /// Element events bubble through the ancestors, then the document and the
    /// window. Document events reach the window.
    pub fn dispatch(&self, source: &EventSource<MemoryElement>, kind: EventKind) -> PageEvent {
        let mut path = vec![];
        if let EventSource::Element(element) = source {
            let mut current = Some(element.clone());
            while let Some(element) = current {
                current = element.parent();
                path.push(EventSource::Element(element));
            }
        }
        if !matches!(source, EventSource::Window) {
            path.push(EventSource::Document);
        }
        path.push(EventSource::Window);

        let event = PageEvent::new(kind);
        for target in &path {
            let handlers: Vec<Handler> = self
                .listeners
                .borrow()
                .iter()
                .filter(|(listened, k, _)| *k == kind && listened == target)
                .map(|(_, _, handler)| handler.clone())
                .collect();
            for handler in handlers {
                handler(&event);
            }
        }
        event
    }

    pub fn click(&self, element: &MemoryElement) -> PageEvent {
        self.dispatch(&EventSource::Element(element.clone()), EventKind::Click)
    }

    pub fn submit(&self, form: &MemoryElement) -> PageEvent {
        self.dispatch(&EventSource::Element(form.clone()), EventKind::Submit)
    }

    /// Scrolls instantly, fires `scroll` and updates the visibility observers.
    pub fn scroll_window_to(&self, scroll_y: f64) -> PageEvent {
        self.window.scroll_y.set(scroll_y.max(0.));
        let event = self.dispatch(&EventSource::Window, EventKind::Scroll);
        self.refresh_visibility();
        event
    }

    /// Reports the observed elements whose visibility changed.
    pub fn refresh_visibility(&self) {
        let viewport_height = self.window.viewport_height.get();
        let mut changes = vec![];
        for observer in self.observers.borrow_mut().iter_mut() {
            for (target, intersecting) in observer.targets.iter_mut() {
                let now = observer.options.is_intersecting(
                    target.viewport_top(),
                    target.rendered_height(),
                    viewport_height,
                );
                if now != *intersecting {
                    *intersecting = now;
                    changes.push((observer.callback.clone(), target.clone(), now));
                }
            }
        }
        for (callback, target, intersecting) in changes {
            callback(&target, intersecting);
        }
    }

    fn select(&self, selector: &str) -> Option<SelectorList> {
        SelectorList::parse(selector)
            .inspect_err(|error| warn!("{error}"))
            .ok()
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MemoryHost {
    type Element = MemoryElement;

    fn query(&self, selector: &str) -> Option<MemoryElement> {
        let selector = self.select(selector)?;
        self.root
            .descendants()
            .into_iter()
            .find(|element| selector.matches(element))
    }

    fn query_all(&self, selector: &str) -> Vec<MemoryElement> {
        let Some(selector) = self.select(selector) else {
            return vec![];
        };
        self.root
            .descendants()
            .into_iter()
            .filter(|element| selector.matches(element))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        self.root
            .descendants()
            .into_iter()
            .find(|element| element.id().as_deref() == Some(id))
    }

    fn is_loading(&self) -> bool {
        self.loading.get()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y.get()
    }

    fn scroll_to(&self, top: f64) {
        debug!(top, "Scroll to");
        self.scroll_requests.borrow_mut().push(top);
        self.scroll_window_to(top);
    }

    fn notify(&self, message: &str) {
        debug!(message, "Notify");
        self.notifications.borrow_mut().push(message.to_owned());
    }

    fn listen(
        &self,
        source: &EventSource<MemoryElement>,
        kind: EventKind,
        handler: Handler,
    ) -> Result<(), HostError> {
        self.listeners
            .borrow_mut()
            .push((source.clone(), kind, handler));
        Ok(())
    }

    fn observe_visibility(
        &self,
        targets: &[MemoryElement],
        options: &VisibilityOptions,
        callback: VisibilityCallback<MemoryElement>,
    ) -> Result<(), HostError> {
        let viewport_height = self.window.viewport_height.get();
        let targets: Vec<(MemoryElement, bool)> = targets
            .iter()
            .map(|target| {
                let intersecting = options.is_intersecting(
                    target.viewport_top(),
                    target.rendered_height(),
                    viewport_height,
                );
                (target.clone(), intersecting)
            })
            .collect();
        let initial = targets.clone();
        self.observers.borrow_mut().push(Observer {
            options: options.clone(),
            targets,
            callback: callback.clone(),
        });

        // Like IntersectionObserver, report every target once when observation starts.
        for (target, intersecting) in initial {
            callback(&target, intersecting);
        }
        Ok(())
    }

    fn stop_observing(&self, target: &MemoryElement) {
        for observer in self.observers.borrow_mut().iter_mut() {
            observer.targets.retain(|(observed, _)| observed != target);
        }
    }

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Result<(), HostError> {
        self.clock.schedule_once(delay, callback);
        Ok(())
    }

    fn set_interval(
        &self,
        period: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<IntervalId, HostError> {
        Ok(IntervalId(self.clock.schedule_repeat(period, callback)))
    }

    fn clear_interval(&self, id: IntervalId) {
        self.clock.cancel(id.0);
    }
}

/// An element of the [MemoryHost] document.
///
/// Clones share the same node. Equality is identity.
#[derive(Clone)]
pub struct MemoryElement(Rc<Node>);

struct Node {
    tag: String,
    attributes: RefCell<Vec<(String, String)>>,
    text: RefCell<String>,
    style: RefCell<Vec<(String, String)>>,
    value: RefCell<String>,

    /// Top and height, relative to the document.
    layout: Cell<(f64, f64)>,

    window: Weak<WindowState>,
    parent: RefCell<Weak<Node>>,
    children: RefCell<Vec<MemoryElement>>,
}

impl MemoryElement {
    fn new(tag: &str, window: &Rc<WindowState>) -> Self {
        Self(Rc::new(Node {
            tag: tag.to_ascii_uppercase(),
            attributes: RefCell::default(),
            text: RefCell::default(),
            style: RefCell::default(),
            value: RefCell::default(),
            layout: Cell::new((0., 0.)),
            window: Rc::downgrade(window),
            parent: RefCell::default(),
            children: RefCell::default(),
        }))
    }

    /// Appends the child and returns it.
    pub fn child(&self, child: MemoryElement) -> MemoryElement {
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
        child
    }

    pub fn with_id(self, id: &str) -> Self {
        self.put_attr("id", id);
        self
    }

    /// Adds one or more space-separated classes.
    pub fn with_class(self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.put_attr(name, value);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        *self.0.text.borrow_mut() = text.to_owned();
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        *self.0.value.borrow_mut() = value.to_owned();
        self
    }

    /// Places the element in the document layout.
    pub fn with_box(self, top: f64, height: f64) -> Self {
        self.0.layout.set((top, height));
        self
    }

    pub fn parent(&self) -> Option<MemoryElement> {
        self.0.parent.borrow().upgrade().map(MemoryElement)
    }

    pub fn children(&self) -> Vec<MemoryElement> {
        self.0.children.borrow().clone()
    }

    /// Descendants in document order.
    pub fn descendants(&self) -> Vec<MemoryElement> {
        let mut descendants = vec![];
        for child in self.0.children.borrow().iter() {
            descendants.push(child.clone());
            descendants.extend(child.descendants());
        }
        descendants
    }

    pub fn value(&self) -> String {
        self.0.value.borrow().clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0
            .style
            .borrow()
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.clone())
    }

    pub fn classes(&self) -> Vec<String> {
        self.attr("class")
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_owned)
            .collect()
    }

    fn set_classes(&self, classes: Vec<String>) {
        self.put_attr("class", &classes.join(" "));
    }
}

impl PageElement for MemoryElement {
    fn attr(&self, name: &str) -> Option<String> {
        self.0
            .attributes
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.clone())
    }

    fn put_attr(&self, name: &str, value: &str) {
        let mut attributes = self.0.attributes.borrow_mut();
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_owned(),
            None => attributes.push((name.to_owned(), value.to_owned())),
        }
    }

    fn tag(&self) -> String {
        self.0.tag.clone()
    }

    fn text(&self) -> String {
        let mut text = self.0.text.borrow().clone();
        for child in self.0.children.borrow().iter() {
            text.push_str(&child.text());
        }
        text
    }

    fn put_text(&self, text: &str) {
        for child in self.0.children.borrow_mut().drain(..) {
            *child.0.parent.borrow_mut() = Weak::new();
        }
        *self.0.text.borrow_mut() = text.to_owned();
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        let mut classes = self.classes();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
            self.set_classes(classes);
        }
    }

    fn remove_class(&self, class: &str) {
        let mut classes = self.classes();
        classes.retain(|c| c != class);
        self.set_classes(classes);
    }

    fn put_style(&self, property: &str, value: &str) {
        let mut style = self.0.style.borrow_mut();
        match style.iter_mut().find(|(name, _)| name == property) {
            Some((_, v)) => *v = value.to_owned(),
            None => style.push((property.to_owned(), value.to_owned())),
        }
    }

    fn set_disabled(&self, disabled: bool) {
        let mut attributes = self.0.attributes.borrow_mut();
        attributes.retain(|(name, _)| name != "disabled");
        if disabled {
            attributes.push(("disabled".to_owned(), String::new()));
        }
    }

    fn is_disabled(&self) -> bool {
        self.attr("disabled").is_some()
    }

    fn put_value(&self, value: &str) {
        *self.0.value.borrow_mut() = value.to_owned();
    }

    fn reset_fields(&self) {
        for field in self.descendants() {
            if matches!(field.0.tag.as_str(), "INPUT" | "TEXTAREA" | "SELECT") {
                field.put_value(&field.attr("value").unwrap_or_default());
            }
        }
    }

    fn viewport_top(&self) -> f64 {
        let scroll_y = self
            .0
            .window
            .upgrade()
            .map(|window| window.scroll_y.get())
            .unwrap_or_default();
        self.0.layout.get().0 - scroll_y
    }

    fn rendered_height(&self) -> f64 {
        self.0.layout.get().1
    }

    fn find(&self, selector: &str) -> Option<Self> {
        let selector = SelectorList::parse(selector)
            .inspect_err(|error| warn!("{error}"))
            .ok()?;
        self.descendants()
            .into_iter()
            .find(|element| selector.matches(element))
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}", self.0.tag.to_ascii_lowercase())?;
        for (name, value) in self.0.attributes.borrow().iter() {
            write!(f, " {name}=\"{value}\"")?;
        }
        write!(f, ">")
    }
}
