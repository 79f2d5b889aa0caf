//! Switches the page text between Portuguese and English.
//!
//! Each translatable element carries both texts as attributes, e.g.
//! `<h1 data-pt="Olá" data-en="Hello">Olá</h1>`.

use std::cell::Cell;
use std::rc::Rc;

use autoclone::autoclone;
use tracing::debug;

use crate::config::LanguageConfig;
use crate::controller::PageController;
use crate::events::EventRegistry;
use crate::host::EventKind;
use crate::host::EventSource;
use crate::host::Host;
use crate::host::PageElement;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Pt,
    En,
}

impl Locale {
    /// The attribute holding the text for this locale.
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Pt => "data-pt",
            Self::En => "data-en",
        }
    }

    /// The locale selected by a selector control: `#lang-pt` selects
    /// Portuguese, any other control English.
    pub fn of_selector(selector: &impl PageElement) -> Self {
        match selector.id().as_deref() {
            Some("lang-pt") => Self::Pt,
            _ => Self::En,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pt => "pt",
            Self::En => "en",
        })
    }
}

/// The active locale.
#[derive(Debug)]
pub struct LanguageSwitch {
    locale: Cell<Locale>,
}

impl LanguageSwitch {
    pub fn new(config: &LanguageConfig) -> Self {
        Self {
            locale: Cell::new(config.default_locale),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale.get()
    }

    /// Shows the texts of the locale and marks the selector as the only active one.
    pub fn select<E: PageElement>(
        &self,
        locale: Locale,
        translatable: &[E],
        selectors: &[E],
        selected: Option<&E>,
        config: &LanguageConfig,
    ) {
        debug!(%locale, "Switch language");
        self.locale.set(locale);
        translate(locale, translatable);
        for selector in selectors {
            selector.remove_class(config.active_class);
        }
        if let Some(selected) = selected {
            selected.add_class(config.active_class);
        }
    }
}

/// Writes the text of the locale into each element: the placeholder of
/// inputs and text areas, the text of anything else.
///
/// Elements without a text for the locale keep their current content.
pub fn translate<E: PageElement>(locale: Locale, elements: &[E]) {
    for element in elements {
        let Some(text) = element.attr(locale.attribute()).filter(|text| !text.is_empty()) else {
            continue;
        };
        match element.tag().as_str() {
            "INPUT" | "TEXTAREA" => element.put_attr("placeholder", &text),
            _ => element.put_text(&text),
        }
    }
}

/// Registers a click handler on each locale selector.
///
/// The selectors and translatable elements are those present at registration.
#[autoclone]
pub fn register<H: Host>(page: &Rc<PageController<H>>, registry: &mut EventRegistry<H::Element>) {
    let config = &page.config().language;
    let selectors = Rc::new(page.host().query_all(config.selectors));
    let translatable = Rc::new(page.host().query_all(config.translatable));
    debug!(
        selectors = selectors.len(),
        translatable = translatable.len(),
        "Language switch"
    );
    for selector in selectors.iter() {
        registry.on(
            EventSource::Element(selector.clone()),
            EventKind::Click,
            move |_event| {
                autoclone!(page, selector, selectors, translatable);
                let config = &page.config().language;
                page.language().select(
                    Locale::of_selector(&selector),
                    &translatable,
                    &selectors,
                    Some(&selector),
                    config,
                );
            },
        );
    }
}
