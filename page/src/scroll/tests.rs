#![cfg(test)]

use std::rc::Rc;
use std::time::Duration;

use super::visibility::SectionState;
use crate::config::PageConfig;
use crate::controller::PageController;
use crate::host::PageElement as _;
use crate::host::memory::MemoryElement;
use crate::host::memory::MemoryHost;

struct Page {
    host: MemoryHost,
    header: MemoryElement,
    steps: MemoryElement,
    stats: MemoryElement,
    customers: MemoryElement,
    cups: MemoryElement,
    awards: MemoryElement,
}

/// A viewport of 800px. The steps are visible from the start, the statistics
/// further down.
fn page() -> Page {
    let host = MemoryHost::new();
    let header = host.body().child(host.create("header").with_box(0., 80.));
    let steps = host.body().child(host.create("div").with_class("step-item").with_box(100., 300.));
    let stats = host.body().child(
        host.create("section")
            .with_class("stats-container")
            .with_box(1500., 300.),
    );
    let stat = |count: &str| {
        stats.child(
            host.create("span")
                .with_class("stat-number")
                .with_attr("data-count", count)
                .with_text("0"),
        )
    };
    let customers = stat("100");
    let cups = stat("1500+");
    let awards = stat("many");
    Page {
        host,
        header,
        steps,
        stats,
        customers,
        cups,
        awards,
    }
}

#[test]
fn fade_in_once() {
    setup_logs();
    let page = page();
    let controller = PageController::start(Rc::new(page.host.clone()), PageConfig::default()).unwrap();
    let sections = controller.scroll().sections();
    assert_eq!(2, sections.len());
    assert!(page.steps.has_class("fade-in"));
    assert_eq!(Some(SectionState::Visible), sections.state(&page.steps));
    assert!(!page.stats.has_class("fade-in"));
    assert_eq!(Some(SectionState::NotYetVisible), sections.state(&page.stats));

    page.host.scroll_window_to(1000.);
    page.host.scroll_window_to(0.);
    assert_eq!(vec!["step-item", "fade-in"], page.steps.classes());
    assert!(page.stats.has_class("fade-in"));
    assert_eq!(Some(SectionState::Visible), sections.state(&page.stats));
}

#[test]
fn counters() {
    setup_logs();
    let page = page();
    let controller = PageController::start(Rc::new(page.host.clone()), PageConfig::default()).unwrap();
    page.host.advance(Duration::from_secs(1));
    assert!(!controller.scroll().counters_started());
    assert_eq!("0", page.cups.text());

    page.host.scroll_window_to(1000.);
    assert!(page.stats.has_class("fade-in"));
    assert!(controller.scroll().counters_started());
    assert_eq!(2, page.host.pending_timers());

    page.host.advance(Duration::from_millis(16));
    assert_eq!("0", page.customers.text());
    assert_eq!("12", page.cups.text());

    page.host.advance(Duration::from_millis(1000));
    let halfway: i64 = page.cups.text().parse().unwrap();
    assert!((700..=800).contains(&halfway), "{halfway}");

    page.host.advance(Duration::from_millis(1100));
    assert_eq!("100", page.customers.text());
    assert_eq!("1500", page.cups.text());
    assert_eq!("0", page.awards.text());
    assert_eq!(0, page.host.pending_timers());
}

#[test]
fn counters_run_once() {
    setup_logs();
    let page = page();
    let _controller = PageController::start(Rc::new(page.host.clone()), PageConfig::default()).unwrap();
    page.host.scroll_window_to(1000.);
    page.host.advance(Duration::from_secs(3));
    page.customers.put_text("0");

    page.host.scroll_window_to(0.);
    page.host.scroll_window_to(1000.);
    assert_eq!(0, page.host.pending_timers());
    page.host.advance(Duration::from_secs(3));
    assert_eq!("0", page.customers.text());
}

#[test]
fn header_treatment() {
    setup_logs();
    let page = page();
    let _controller = PageController::start(Rc::new(page.host.clone()), PageConfig::default()).unwrap();
    let background = || page.header.style("background");
    let shadow = || page.header.style("box-shadow");
    assert_eq!(Some("rgba(255, 255, 255, 0.95)".to_owned()), background());

    page.host.scroll_window_to(150.);
    assert_eq!(Some("rgba(255, 255, 255, 0.98)".to_owned()), background());
    assert_eq!(Some("0 4px 20px rgba(0, 0, 0, 0.1)".to_owned()), shadow());

    page.host.scroll_window_to(100.);
    assert_eq!(Some("rgba(255, 255, 255, 0.95)".to_owned()), background());
    assert_eq!(Some("0 2px 10px rgba(0, 0, 0, 0.05)".to_owned()), shadow());

    page.host.scroll_window_to(0.);
    assert_eq!(Some("rgba(255, 255, 255, 0.95)".to_owned()), background());
}

#[test]
fn header_at_startup() {
    setup_logs();
    let page = page();
    page.host.scroll_window_to(250.);
    let _controller = PageController::start(Rc::new(page.host.clone()), PageConfig::default()).unwrap();
    assert_eq!(
        Some("rgba(255, 255, 255, 0.98)".to_owned()),
        page.header.style("background")
    );
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
