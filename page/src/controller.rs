//! Wires the page behaviors to a [Host].

use std::cell::OnceCell;
use std::rc::Rc;

use autoclone::autoclone;
use tracing::debug;
use tracing::info;

use crate::config::PageConfig;
use crate::events::EventRegistry;
use crate::forms;
use crate::forms::FormInterception;
use crate::host::EventKind;
use crate::host::EventSource;
use crate::host::Host;
use crate::host::HostError;
use crate::host::PageEvent;
use crate::language;
use crate::language::LanguageSwitch;
use crate::language::Locale;
use crate::menu;
use crate::menu::MobileMenu;
use crate::scroll;
use crate::scroll::ScrollReactions;
use crate::utils::or_warn::OrWarn as _;

/// The state of an enhanced page.
///
/// Shared by every event handler, hence always behind an [Rc].
pub struct PageController<H: Host> {
    host: Rc<H>,
    config: PageConfig,
    language: LanguageSwitch,
    menu: MobileMenu,
    scroll: ScrollReactions<H::Element>,
    forms: FormInterception,
}

impl<H: Host> PageController<H> {
    /// Registers every behavior on the host and starts observing sections.
    pub fn start(host: Rc<H>, config: PageConfig) -> Result<Rc<Self>, HostError> {
        let page = Rc::new(Self {
            host,
            language: LanguageSwitch::new(&config.language),
            menu: MobileMenu::default(),
            scroll: ScrollReactions::default(),
            forms: FormInterception::default(),
            config,
        });

        let mut registry = EventRegistry::default();
        language::register(&page, &mut registry);
        menu::register(&page, &mut registry);
        scroll::register(&page, &mut registry);
        forms::register(&page, &mut registry);
        registry.attach(page.host.as_ref())?;

        scroll::observe_sections(&page)?;
        scroll::restyle_header(&page);
        info!(handlers = registry.len(), "Page started");
        Ok(page)
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn language(&self) -> &LanguageSwitch {
        &self.language
    }

    pub fn locale(&self) -> Locale {
        self.language.locale()
    }

    pub fn menu(&self) -> &MobileMenu {
        &self.menu
    }

    pub fn scroll(&self) -> &ScrollReactions<H::Element> {
        &self.scroll
    }

    pub fn forms(&self) -> &FormInterception {
        &self.forms
    }

    /// Switches the locale as if its selector had been clicked.
    ///
    /// The first selector mapped to the locale becomes the active one.
    pub fn switch_locale(&self, locale: Locale) {
        let config = &self.config.language;
        let selectors = self.host.query_all(config.selectors);
        let translatable = self.host.query_all(config.translatable);
        let selected = selectors
            .iter()
            .find(|selector| Locale::of_selector(*selector) == locale);
        if selected.is_none() {
            debug!(%locale, "No selector for the locale");
        }
        self.language
            .select(locale, &translatable, &selectors, selected, config);
    }
}

impl<H: Host> std::fmt::Debug for PageController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageController")
            .field("locale", &self.language.locale())
            .field("menu_open", &self.menu.is_open())
            .field("sending", &self.forms.is_sending())
            .finish()
    }
}

/// The controller of a page that may not have started yet.
pub struct PendingPage<H: Host>(Rc<OnceCell<Rc<PageController<H>>>>);

impl<H: Host> PendingPage<H> {
    /// The controller, once the document is ready.
    pub fn get(&self) -> Option<Rc<PageController<H>>> {
        self.0.get().cloned()
    }
}

impl<H: Host> Clone for PendingPage<H> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Starts the page now if the document is parsed, otherwise on `DOMContentLoaded`.
#[autoclone]
pub fn run_when_ready<H: Host>(host: Rc<H>, config: PageConfig) -> Result<PendingPage<H>, HostError> {
    let pending = PendingPage(Rc::default());
    if !host.is_loading() {
        let page = PageController::start(host, config)?;
        let _ = pending.0.set(page);
        return Ok(pending);
    }

    debug!("Waiting for the document");
    let cell = pending.0.clone();
    host.listen(
        &EventSource::Document,
        EventKind::DomContentLoaded,
        Rc::new(move |_: &PageEvent| {
            autoclone!(host, config);
            if cell.get().is_some() {
                return;
            }
            if let Some(page) = PageController::start(host.clone(), config.clone()).or_warn("Start page") {
                let _ = cell.set(page);
            }
        }),
    )?;
    Ok(pending)
}
