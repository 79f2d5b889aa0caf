//! Simulated form submissions and smooth in-page anchors.
//!
//! Nothing is ever sent: the contact form waits a little to look busy, then
//! thanks the user. The newsletter form thanks the user right away.

use std::cell::Cell;
use std::rc::Rc;

use autoclone::autoclone;
use tracing::debug;

use crate::controller::PageController;
use crate::events::EventRegistry;
use crate::host::EventKind;
use crate::host::EventSource;
use crate::host::Host;
use crate::host::PageElement;
use crate::host::PageEvent;
use crate::utils::or_warn::OrWarn as _;

/// State of the contact form.
#[derive(Debug, Default)]
pub struct FormInterception {
    sending: Cell<bool>,
}

impl FormInterception {
    /// True between a contact submission and its confirmation.
    pub fn is_sending(&self) -> bool {
        self.sending.get()
    }
}

pub fn register<H: Host>(page: &Rc<PageController<H>>, registry: &mut EventRegistry<H::Element>) {
    register_contact_form(page, registry);
    register_newsletter_form(page, registry);
    register_anchors(page, registry);
}

#[autoclone]
fn register_contact_form<H: Host>(
    page: &Rc<PageController<H>>,
    registry: &mut EventRegistry<H::Element>,
) {
    let config = &page.config().forms;
    let Some(form) = page.host().element_by_id(config.contact_form_id) else {
        return;
    };
    registry.on(
        EventSource::Element(form.clone()),
        EventKind::Submit,
        move |event| {
            autoclone!(page, form);
            submit_contact_form(&page, &form, event);
        },
    );
}

/// Disables the submit button while "sending", then confirms, clears the
/// form and restores the button.
#[autoclone]
pub fn submit_contact_form<H: Host>(
    page: &Rc<PageController<H>>,
    form: &H::Element,
    event: &PageEvent,
) {
    event.prevent_default();
    if page.forms().sending.replace(true) {
        debug!("Contact form is already sending");
        return;
    }
    let config = &page.config().forms;
    let button = form.find(config.submit_button);
    let label = button.as_ref().map(|button| button.text());
    if let Some(button) = &button {
        button.put_text(config.sending_label);
        button.set_disabled(true);
    }
    debug!("Sending contact form");

    let form = form.clone();
    let scheduled = page.host().set_timeout(
        config.submit_delay,
        Box::new(move || {
            autoclone!(page);
            let config = &page.config().forms;
            page.host().notify(config.contact_success);
            form.reset_fields();
            if let (Some(button), Some(label)) = (button, label) {
                button.put_text(&label);
                button.set_disabled(false);
            }
            page.forms().sending.set(false);
            debug!("Contact form sent");
        }),
    );
    if scheduled.or_warn("Contact form").is_none() {
        page.forms().sending.set(false);
    }
}

#[autoclone]
fn register_newsletter_form<H: Host>(
    page: &Rc<PageController<H>>,
    registry: &mut EventRegistry<H::Element>,
) {
    let config = &page.config().forms;
    let Some(form) = page.host().query(config.newsletter_form) else {
        return;
    };
    registry.on(
        EventSource::Element(form.clone()),
        EventKind::Submit,
        move |event| {
            autoclone!(page, form);
            event.prevent_default();
            let config = &page.config().forms;
            page.host().notify(config.newsletter_success);
            if let Some(email) = form.find(config.email_input) {
                email.put_value("");
            }
            debug!("Newsletter subscription");
        },
    );
}

#[autoclone]
fn register_anchors<H: Host>(
    page: &Rc<PageController<H>>,
    registry: &mut EventRegistry<H::Element>,
) {
    let config = &page.config().forms;
    for anchor in page.host().query_all(config.anchors) {
        registry.on(
            EventSource::Element(anchor.clone()),
            EventKind::Click,
            move |event| {
                autoclone!(page, anchor);
                event.prevent_default();
                let Some(href) = anchor.attr("href") else {
                    return;
                };
                if let Some(top) = anchor_offset(page.host().as_ref(), &href, page.config().forms.header) {
                    debug!(%href, top, "Scroll to anchor");
                    page.host().scroll_to(top);
                }
            },
        );
    }
}

/// The scroll offset that brings the anchor target just below the header.
///
/// `None` for a bare `#` or a missing target.
pub fn anchor_offset<H: Host>(host: &H, href: &str, header: &str) -> Option<f64> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }
    let target = host.element_by_id(id)?;
    let header_height = host
        .query(header)
        .map(|header| header.rendered_height())
        .unwrap_or_default();
    Some(target.viewport_top() + host.scroll_y() - header_height)
}

#[cfg(test)]
mod tests;
