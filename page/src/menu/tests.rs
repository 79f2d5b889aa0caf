#![cfg(test)]

use std::rc::Rc;

use crate::config::PageConfig;
use crate::controller::PageController;
use crate::host::PageElement as _;
use crate::host::memory::MemoryHost;

#[test]
fn hamburger_alternates() {
    setup_logs();
    let host = MemoryHost::new();
    let hamburger = host.body().child(host.create("div").with_class("hamburger-menu"));
    let panel = host.body().child(host.create("ul").with_class("nav-menu"));
    let page = PageController::start(Rc::new(host.clone()), PageConfig::default()).unwrap();

    let mut states = vec![];
    for _ in 0..3 {
        host.click(&hamburger);
        states.push((
            page.menu().is_open(),
            hamburger.has_class("active"),
            panel.has_class("active"),
        ));
    }
    assert_eq!(
        vec![(true, true, true), (false, false, false), (true, true, true)],
        states
    );
}

#[test]
fn links_close() {
    setup_logs();
    let host = MemoryHost::new();
    let hamburger = host.body().child(host.create("div").with_class("hamburger-menu"));
    let panel = host.body().child(host.create("ul").with_class("nav-menu"));
    let item = panel.child(host.create("li"));
    let link = item.child(host.create("a").with_attr("href", "/blog"));
    let page = PageController::start(Rc::new(host.clone()), PageConfig::default()).unwrap();

    host.click(&hamburger);
    assert!(page.menu().is_open());
    host.click(&link);
    assert!(!page.menu().is_open());
    assert!(!hamburger.has_class("active"));
    assert!(!panel.has_class("active"));

    // Closing a closed menu is harmless.
    host.click(&link);
    assert!(!page.menu().is_open());
    assert_eq!(vec!["nav-menu"], panel.classes());
}

#[test]
fn no_hamburger() {
    setup_logs();
    let host = MemoryHost::new();
    let panel = host.body().child(host.create("ul").with_class("nav-menu"));
    let link = panel.child(host.create("a").with_attr("href", "/blog"));
    let page = PageController::start(Rc::new(host.clone()), PageConfig::default()).unwrap();
    // Only the header restyle.
    assert_eq!(1, host.listener_count());
    host.click(&link);
    assert!(!page.menu().is_open());
    assert!(!panel.has_class("active"));
}

#[test]
fn no_panel() {
    setup_logs();
    let host = MemoryHost::new();
    let hamburger = host.body().child(host.create("div").with_class("hamburger-menu"));
    let page = PageController::start(Rc::new(host.clone()), PageConfig::default()).unwrap();
    host.click(&hamburger);
    assert!(page.menu().is_open());
    assert!(hamburger.has_class("active"));
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
