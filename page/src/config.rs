//! Selectors, class names, timings and messages of the landing page.

use std::time::Duration;

use crate::language::Locale;
use crate::scroll::visibility::VisibilityOptions;

#[derive(Clone, Debug, Default)]
pub struct PageConfig {
    pub language: LanguageConfig,
    pub menu: MenuConfig,
    pub scroll: ScrollConfig,
    pub forms: FormsConfig,
}

#[derive(Clone, Debug)]
pub struct LanguageConfig {
    /// The locale selector controls.
    pub selectors: &'static str,

    /// Elements carrying one text per locale.
    pub translatable: &'static str,

    /// Class marking the selected locale control.
    pub active_class: &'static str,

    pub default_locale: Locale,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            selectors: ".lang-btn",
            translatable: "[data-pt], [data-en]",
            active_class: "active",
            default_locale: Locale::Pt,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MenuConfig {
    pub hamburger: &'static str,
    pub panel: &'static str,
    pub links: &'static str,
    pub open_class: &'static str,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            hamburger: ".hamburger-menu",
            panel: ".nav-menu",
            links: ".nav-menu a",
            open_class: "active",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScrollConfig {
    /// Sections that fade in when they first become visible.
    pub animated: &'static str,
    pub fade_in_class: &'static str,

    /// Class of the section that starts the counters.
    pub stats_container_class: &'static str,

    pub visibility: VisibilityOptions,
    pub counter: CounterConfig,
    pub header: HeaderConfig,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            animated: ".step-item, .content-wrapper-ray-valley, .stats-container, .coffee-features",
            fade_in_class: "fade-in",
            stats_container_class: "stats-container",
            visibility: VisibilityOptions::default(),
            counter: CounterConfig::default(),
            header: HeaderConfig::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CounterConfig {
    pub counters: &'static str,
    pub count_attribute: &'static str,
    pub duration: Duration,
    pub tick: Duration,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            counters: ".stat-number",
            count_attribute: "data-count",
            duration: Duration::from_millis(2000),
            tick: Duration::from_millis(16),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HeaderConfig {
    pub header: &'static str,

    /// Scroll offset above which the header switches to the scrolled treatment.
    pub scrolled_after: f64,

    pub top: HeaderStyle,
    pub scrolled: HeaderStyle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderStyle {
    pub background: &'static str,
    pub box_shadow: &'static str,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            header: "header",
            scrolled_after: 100.,
            top: HeaderStyle {
                background: "rgba(255, 255, 255, 0.95)",
                box_shadow: "0 2px 10px rgba(0, 0, 0, 0.05)",
            },
            scrolled: HeaderStyle {
                background: "rgba(255, 255, 255, 0.98)",
                box_shadow: "0 4px 20px rgba(0, 0, 0, 0.1)",
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct FormsConfig {
    pub contact_form_id: &'static str,
    pub submit_button: &'static str,
    pub sending_label: &'static str,
    pub submit_delay: Duration,
    pub contact_success: &'static str,

    pub newsletter_form: &'static str,
    pub email_input: &'static str,
    pub newsletter_success: &'static str,

    /// Links to anchors of the same page.
    pub anchors: &'static str,
    pub header: &'static str,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            contact_form_id: "contactForm",
            submit_button: "button[type=\"submit\"]",
            sending_label: "Enviando...",
            submit_delay: Duration::from_millis(1500),
            contact_success: "Mensagem enviada com sucesso! Entraremos em contato em breve.",
            newsletter_form: ".newsletter-form",
            email_input: "input[type=\"email\"]",
            newsletter_success: "Obrigado por se inscrever em nossa newsletter!",
            anchors: "a[href^=\"#\"]",
            header: "header",
        }
    }
}
