//! Reactions to scrolling: fade-in of sections, statistics counters and the
//! header treatment.

use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use autoclone::autoclone;
use tracing::debug;
use tracing::trace;

use self::counter::CounterAnimation;
use self::counter::parse_count;
use self::header::HeaderTreatment;
use self::visibility::VisibilityTracker;
use crate::controller::PageController;
use crate::events::EventRegistry;
use crate::host::EventKind;
use crate::host::EventSource;
use crate::host::Host;
use crate::host::HostError;
use crate::host::IntervalId;
use crate::host::PageElement;
use crate::utils::or_warn::OrWarn as _;

pub mod counter;
pub mod header;
pub mod visibility;

/// Scroll state of the page.
#[derive(Debug)]
pub struct ScrollReactions<E> {
    sections: VisibilityTracker<E>,
    counters_started: Cell<bool>,
}

impl<E: PageElement> ScrollReactions<E> {
    pub fn sections(&self) -> &VisibilityTracker<E> {
        &self.sections
    }

    pub fn counters_started(&self) -> bool {
        self.counters_started.get()
    }
}

impl<E> Default for ScrollReactions<E> {
    fn default() -> Self {
        Self {
            sections: VisibilityTracker::default(),
            counters_started: Cell::new(false),
        }
    }
}

/// Restyles the header on every scroll.
#[autoclone]
pub fn register<H: Host>(page: &Rc<PageController<H>>, registry: &mut EventRegistry<H::Element>) {
    registry.on(EventSource::Window, EventKind::Scroll, move |_event| {
        autoclone!(page);
        restyle_header(&page);
    });
}

/// Applies the header treatment for the current scroll offset.
pub fn restyle_header<H: Host>(page: &PageController<H>) {
    let config = &page.config().scroll.header;
    let Some(header) = page.host().query(config.header) else {
        return;
    };
    let treatment = HeaderTreatment::for_scroll(page.host().scroll_y(), config);
    trace!(?treatment, "Restyle header");
    treatment.apply(&header, config);
}

/// Starts observing the animated sections.
#[autoclone]
pub fn observe_sections<H: Host>(page: &Rc<PageController<H>>) -> Result<(), HostError> {
    let config = &page.config().scroll;
    let sections = page.host().query_all(config.animated);
    if sections.is_empty() {
        return Ok(());
    }
    for section in &sections {
        page.scroll().sections.track(section);
    }
    debug!(count = sections.len(), "Observe sections");
    page.host().observe_visibility(
        &sections,
        &config.visibility,
        Rc::new(move |section: &H::Element, intersecting: bool| {
            autoclone!(page);
            if intersecting {
                reveal(&page, section);
            }
        }),
    )
}

/// Fades the section in the first time it becomes visible, and starts the
/// counters if it is the statistics section.
pub fn reveal<H: Host>(page: &Rc<PageController<H>>, section: &H::Element) {
    let config = &page.config().scroll;
    if !page.scroll().sections.reveal(section) {
        return;
    }
    debug!(?section, "Reveal");
    section.add_class(config.fade_in_class);
    page.host().stop_observing(section);
    if section.has_class(config.stats_container_class) {
        animate_counters(page);
    }
}

/// Counts every statistic up from zero to its target, all at once.
///
/// Runs at most once per page. Counters without a numeric target are left alone.
pub fn animate_counters<H: Host>(page: &Rc<PageController<H>>) {
    if page.scroll().counters_started.replace(true) {
        return;
    }
    let config = &page.config().scroll.counter;
    for counter in page.host().query_all(config.counters) {
        let Some(target) = counter.attr(config.count_attribute).as_deref().and_then(parse_count)
        else {
            debug!(?counter, "Not a number, skip");
            continue;
        };
        let animation = CounterAnimation::new(target, config.duration, config.tick);
        start_counter(page.host(), counter, animation, config.tick);
    }
}

fn start_counter<H: Host>(
    host: &Rc<H>,
    counter: H::Element,
    animation: CounterAnimation,
    period: Duration,
) {
    let animation = RefCell::new(animation);
    let interval: Rc<Cell<Option<IntervalId>>> = Rc::default();
    let tick = {
        let host = host.clone();
        let interval = interval.clone();
        move || {
            let tick = animation.borrow_mut().tick();
            trace!(?counter, value = tick.value, "Tick");
            counter.put_text(&tick.value.to_string());
            if tick.done {
                if let Some(interval) = interval.take() {
                    host.clear_interval(interval);
                }
            }
        }
    };
    if let Some(id) = host
        .set_interval(period, Box::new(tick))
        .or_warn("Start counter")
    {
        interval.set(Some(id));
    }
}

#[cfg(test)]
mod tests;
