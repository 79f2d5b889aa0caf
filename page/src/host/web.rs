//! The browser [Host], backed by `web_sys`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;
use tracing::warn;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use web_sys::Document;
use web_sys::Element;
use web_sys::Event;
use web_sys::EventTarget;
use web_sys::HtmlElement;
use web_sys::HtmlFormElement;
use web_sys::HtmlInputElement;
use web_sys::HtmlTextAreaElement;
use web_sys::IntersectionObserver;
use web_sys::IntersectionObserverEntry;
use web_sys::IntersectionObserverInit;
use web_sys::ScrollBehavior;
use web_sys::ScrollToOptions;
use web_sys::Window;
use web_sys::js_sys::Array;

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
use crate::utils::or_warn::OrWarn as _;

pub struct WebHost {
    window: Window,
    document: Document,

    /// Running intervals. The closure must outlive the interval.
    intervals: RefCell<HashMap<i32, Closure<dyn FnMut()>>>,

    /// Closures of cleared intervals.
    ///
    /// An interval may clear itself while running, so its closure can only be
    /// dropped later, on the next timer call.
    retired: RefCell<Vec<Closure<dyn FnMut()>>>,

    observers: RefCell<Vec<IntersectionObserver>>,
}

impl WebHost {
    pub fn new(window: Window) -> Result<Self, HostError> {
        let document = window.document().ok_or(HostError::Missing("document"))?;
        Ok(Self {
            window,
            document,
            intervals: RefCell::default(),
            retired: RefCell::default(),
            observers: RefCell::default(),
        })
    }

    fn drop_retired(&self) {
        let retired = self.retired.take();
        if !retired.is_empty() {
            debug!(count = retired.len(), "Drop retired intervals");
        }
    }

    fn event_target(&self, source: &EventSource<Element>) -> EventTarget {
        match source {
            EventSource::Window => self.window.clone().into(),
            EventSource::Document => self.document.clone().into(),
            EventSource::Element(element) => element.clone().into(),
        }
    }
}

impl Host for WebHost {
    type Element = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document
            .query_selector(selector)
            .map_err(describe)
            .or_warn(selector)
            .flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Some(list) = self
            .document
            .query_selector_all(selector)
            .map_err(describe)
            .or_warn(selector)
        else {
            return vec![];
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn is_loading(&self) -> bool {
        super::is_loading_state(&self.document.ready_state())
    }

    fn scroll_y(&self) -> f64 {
        self.window
            .scroll_y()
            .map_err(describe)
            .or_warn("scrollY")
            .unwrap_or_default()
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn notify(&self, message: &str) {
        self.window
            .alert_with_message(message)
            .map_err(describe)
            .or_warn("Alert");
    }

    fn listen(
        &self,
        source: &EventSource<Element>,
        kind: EventKind,
        handler: Handler,
    ) -> Result<(), HostError> {
        let closure: Closure<dyn Fn(Event)> = Closure::new(move |event: Event| {
            let page_event = PageEvent::new(kind);
            handler(&page_event);
            if page_event.default_prevented() {
                event.prevent_default();
            }
        });
        // Owned by the browser from now on.
        let function = closure.into_js_value();
        self.event_target(source)
            .add_event_listener_with_callback(kind.as_str(), function.unchecked_ref())
            .map_err(|error| HostError::Listen {
                kind,
                message: describe(error),
            })
    }

    fn observe_visibility(
        &self,
        targets: &[Element],
        options: &VisibilityOptions,
        callback: VisibilityCallback<Element>,
    ) -> Result<(), HostError> {
        let on_entries: Closure<dyn Fn(Array, IntersectionObserver)> =
            Closure::new(move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        warn!("Not an IntersectionObserverEntry");
                        continue;
                    };
                    callback(&entry.target(), entry.is_intersecting());
                }
            });
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin());
        let observer =
            IntersectionObserver::new_with_options(on_entries.into_js_value().unchecked_ref(), &init)
                .map_err(|error| HostError::Observe(describe(error)))?;
        for target in targets {
            observer.observe(target);
        }
        self.observers.borrow_mut().push(observer);
        Ok(())
    }

    fn stop_observing(&self, target: &Element) {
        for observer in self.observers.borrow().iter() {
            observer.unobserve(target);
        }
    }

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Result<(), HostError> {
        self.drop_retired();
        let function = Closure::once_into_js(move || callback());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                function.unchecked_ref(),
                millis(delay),
            )
            .map_err(|error| HostError::Timer(describe(error)))?;
        Ok(())
    }

    fn set_interval(
        &self,
        period: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<IntervalId, HostError> {
        self.drop_retired();
        let closure = Closure::wrap(callback);
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis(period),
            )
            .map_err(|error| HostError::Timer(describe(error)))?;
        self.intervals.borrow_mut().insert(id, closure);
        Ok(IntervalId(id))
    }

    fn clear_interval(&self, id: IntervalId) {
        self.window.clear_interval_with_handle(id.0);
        if let Some(closure) = self.intervals.borrow_mut().remove(&id.0) {
            self.retired.borrow_mut().push(closure);
        }
    }
}

impl PageElement for Element {
    fn attr(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn put_attr(&self, name: &str, value: &str) {
        self.set_attribute(name, value)
            .map_err(describe)
            .or_warn(name);
    }

    fn tag(&self) -> String {
        self.tag_name().to_ascii_uppercase()
    }

    fn text(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn put_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        self.class_list()
            .add_1(class)
            .map_err(describe)
            .or_warn(class);
    }

    fn remove_class(&self, class: &str) {
        self.class_list()
            .remove_1(class)
            .map_err(describe)
            .or_warn(class);
    }

    fn put_style(&self, property: &str, value: &str) {
        let Some(element) = self.dyn_ref::<HtmlElement>() else {
            warn!(element = ?self, "Not an HTML element, can't set '{property}'");
            return;
        };
        element
            .style()
            .set_property(property, value)
            .map_err(describe)
            .or_warn(property);
    }

    fn set_disabled(&self, disabled: bool) {
        self.toggle_attribute_with_force("disabled", disabled)
            .map_err(describe)
            .or_warn("disabled");
    }

    fn is_disabled(&self) -> bool {
        self.has_attribute("disabled")
    }

    fn put_value(&self, value: &str) {
        if let Some(input) = self.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(text_area) = self.dyn_ref::<HtmlTextAreaElement>() {
            text_area.set_value(value);
        } else {
            warn!(element = ?self, "Not a text field");
        }
    }

    fn reset_fields(&self) {
        match self.dyn_ref::<HtmlFormElement>() {
            Some(form) => form.reset(),
            None => warn!(element = ?self, "Not a form"),
        }
    }

    fn viewport_top(&self) -> f64 {
        self.get_bounding_client_rect().top()
    }

    fn rendered_height(&self) -> f64 {
        match self.dyn_ref::<HtmlElement>() {
            Some(element) => element.offset_height().into(),
            None => self.get_bounding_client_rect().height(),
        }
    }

    fn find(&self, selector: &str) -> Option<Self> {
        self.query_selector(selector)
            .map_err(describe)
            .or_warn(selector)
            .flatten()
    }
}

fn describe(error: JsValue) -> String {
    error.as_string().unwrap_or_else(|| format!("{error:?}"))
}

fn millis(duration: Duration) -> i32 {
    duration.as_millis().try_into().unwrap_or(i32::MAX)
}
