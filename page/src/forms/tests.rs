#![cfg(test)]

use std::rc::Rc;
use std::time::Duration;

use super::anchor_offset;
use crate::config::PageConfig;
use crate::controller::PageController;
use crate::host::PageElement as _;
use crate::host::memory::MemoryElement;
use crate::host::memory::MemoryHost;

const CONTACT_SUCCESS: &str = "Mensagem enviada com sucesso! Entraremos em contato em breve.";
const NEWSLETTER_SUCCESS: &str = "Obrigado por se inscrever em nossa newsletter!";

struct ContactForm {
    form: MemoryElement,
    name: MemoryElement,
    message: MemoryElement,
    button: MemoryElement,
}

fn contact_form(host: &MemoryHost) -> ContactForm {
    let form = host.body().child(host.create("form").with_id("contactForm"));
    let name = form.child(host.create("input").with_attr("type", "text").with_value("Ana"));
    let message = form.child(host.create("textarea").with_value("Quero um orçamento"));
    let button = form.child(
        host.create("button")
            .with_attr("type", "submit")
            .with_text("Enviar mensagem"),
    );
    ContactForm {
        form,
        name,
        message,
        button,
    }
}

#[test]
fn contact_submission() {
    setup_logs();
    let host = MemoryHost::new();
    let contact = contact_form(&host);
    let page = PageController::start(Rc::new(host.clone()), PageConfig::default()).unwrap();

    let event = host.submit(&contact.form);
    assert!(event.default_prevented());
    assert!(page.forms().is_sending());
    assert_eq!("Enviando...", contact.button.text());
    assert!(contact.button.is_disabled());

    host.advance(Duration::from_millis(1499));
    assert!(host.notifications().is_empty());
    assert_eq!("Ana", contact.name.value());

    host.advance(Duration::from_millis(1));
    assert_eq!(vec![CONTACT_SUCCESS], host.notifications());
    assert_eq!("", contact.name.value());
    assert_eq!("", contact.message.value());
    assert_eq!("Enviar mensagem", contact.button.text());
    assert!(!contact.button.is_disabled());
    assert!(!page.forms().is_sending());
}

#[test]
fn contact_submission_while_sending() {
    setup_logs();
    let host = MemoryHost::new();
    let contact = contact_form(&host);
    let _page = PageController::start(Rc::new(host.clone()), PageConfig::default()).unwrap();

    host.submit(&contact.form);
    host.advance(Duration::from_millis(500));
    let event = host.submit(&contact.form);
    assert!(event.default_prevented());

    host.advance(Duration::from_secs(5));
    assert_eq!(vec![CONTACT_SUCCESS], host.notifications());
    assert_eq!("Enviar mensagem", contact.button.text());
    assert!(!contact.button.is_disabled());
    assert_eq!(0, host.pending_timers());

    // Sending again once confirmed.
    host.submit(&contact.form);
    host.advance(Duration::from_millis(1500));
    assert_eq!(2, host.notifications().len());
}

#[test]
fn contact_form_without_button() {
    setup_logs();
    let host = MemoryHost::new();
    let form = host.body().child(host.create("form").with_id("contactForm"));
    let email = form.child(host.create("input").with_attr("type", "email").with_value("ana@example.com"));
    let _page = PageController::start(Rc::new(host.clone()), PageConfig::default()).unwrap();

    assert!(host.submit(&form).default_prevented());
    host.advance(Duration::from_millis(1500));
    assert_eq!(vec![CONTACT_SUCCESS], host.notifications());
    assert_eq!("", email.value());
}

#[test]
fn newsletter_subscription() {
    setup_logs();
    let host = MemoryHost::new();
    let footer = host.body().child(host.create("footer"));
    let form = footer.child(host.create("form").with_class("newsletter-form"));
    let email = form.child(host.create("input").with_attr("type", "email").with_value("ana@example.com"));
    let _page = PageController::start(Rc::new(host.clone()), PageConfig::default()).unwrap();

    let event = host.submit(&form);
    assert!(event.default_prevented());
    assert_eq!(vec![NEWSLETTER_SUCCESS], host.notifications());
    assert_eq!("", email.value());
    assert_eq!(0, host.pending_timers());
}

struct Anchors {
    host: MemoryHost,
    header: MemoryElement,
    section: MemoryElement,
}

fn anchors() -> Anchors {
    let host = MemoryHost::new();
    let header = host.body().child(host.create("header").with_box(0., 80.));
    let section = host.body().child(host.create("section").with_id("section1").with_box(1200., 400.));
    Anchors {
        host,
        header,
        section,
    }
}

#[test]
fn anchor_scrolls_below_header() {
    setup_logs();
    let Anchors { host, header, .. } = anchors();
    let link = host.body().child(host.create("a").with_attr("href", "#section1"));
    let _page = PageController::start(Rc::new(host.clone()), PageConfig::default()).unwrap();
    host.scroll_window_to(300.);

    let event = host.click(&link);
    assert!(event.default_prevented());
    assert_eq!(vec![1120.], host.scroll_requests());
    assert_eq!(
        Some("rgba(255, 255, 255, 0.98)".to_owned()),
        header.style("background")
    );
}

#[test]
fn bare_anchor() {
    setup_logs();
    let Anchors { host, .. } = anchors();
    let top = host.body().child(host.create("a").with_attr("href", "#"));
    let missing = host.body().child(host.create("a").with_attr("href", "#nowhere"));
    let _page = PageController::start(Rc::new(host.clone()), PageConfig::default()).unwrap();

    assert!(host.click(&top).default_prevented());
    assert!(host.click(&missing).default_prevented());
    assert!(host.scroll_requests().is_empty());
}

#[test]
fn offset() {
    setup_logs();
    let Anchors { host, section, .. } = anchors();
    assert_eq!(Some(1120.), anchor_offset(&host, "#section1", "header"));
    host.scroll_window_to(500.);
    assert_eq!(700., section.viewport_top());
    assert_eq!(Some(1120.), anchor_offset(&host, "#section1", "header"));
    assert_eq!(Some(1200.), anchor_offset(&host, "#section1", "nav"));
    assert_eq!(None, anchor_offset(&host, "#", "header"));
    assert_eq!(None, anchor_offset(&host, "#nowhere", "header"));
    assert_eq!(None, anchor_offset(&host, "section1", "header"));
}

fn setup_logs() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .try_init();
}
