//! The mobile navigation menu.

use std::cell::Cell;
use std::rc::Rc;

use autoclone::autoclone;
use tracing::debug;

use crate::config::MenuConfig;
use crate::controller::PageController;
use crate::events::EventRegistry;
use crate::host::EventKind;
use crate::host::EventSource;
use crate::host::Host;
use crate::host::PageElement;

/// Whether the menu is open. The open class on the hamburger and on the
/// panel always mirrors this flag.
#[derive(Debug, Default)]
pub struct MobileMenu {
    open: Cell<bool>,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn toggle<E: PageElement>(&self, hamburger: &E, panel: Option<&E>, config: &MenuConfig) {
        self.set_open(!self.open.get(), hamburger, panel, config);
    }

    pub fn close<E: PageElement>(&self, hamburger: &E, panel: Option<&E>, config: &MenuConfig) {
        self.set_open(false, hamburger, panel, config);
    }

    fn set_open<E: PageElement>(
        &self,
        open: bool,
        hamburger: &E,
        panel: Option<&E>,
        config: &MenuConfig,
    ) {
        debug!(open, "Mobile menu");
        self.open.set(open);
        for element in std::iter::once(hamburger).chain(panel) {
            if open {
                element.add_class(config.open_class);
            } else {
                element.remove_class(config.open_class);
            }
        }
    }
}

/// Registers the hamburger toggle and the closing of the menu on link clicks.
///
/// Nothing is registered when the page has no hamburger.
#[autoclone]
pub fn register<H: Host>(page: &Rc<PageController<H>>, registry: &mut EventRegistry<H::Element>) {
    let config = &page.config().menu;
    let Some(hamburger) = page.host().query(config.hamburger) else {
        debug!("No mobile menu");
        return;
    };
    let panel = page.host().query(config.panel);

    registry.on(
        EventSource::Element(hamburger.clone()),
        EventKind::Click,
        move |_event| {
            autoclone!(page, hamburger, panel);
            page.menu()
                .toggle(&hamburger, panel.as_ref(), &page.config().menu);
        },
    );

    for link in page.host().query_all(config.links) {
        registry.on(EventSource::Element(link), EventKind::Click, move |_event| {
            autoclone!(page, hamburger, panel);
            page.menu()
                .close(&hamburger, panel.as_ref(), &page.config().menu);
        });
    }
}

#[cfg(test)]
mod tests;
