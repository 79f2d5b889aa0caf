//! Header background and shadow as a function of the scroll offset.

use crate::config::HeaderConfig;
use crate::config::HeaderStyle;
use crate::host::PageElement;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderTreatment {
    Top,
    Scrolled,
}

impl HeaderTreatment {
    pub fn for_scroll(scroll_y: f64, config: &HeaderConfig) -> Self {
        if scroll_y > config.scrolled_after {
            Self::Scrolled
        } else {
            Self::Top
        }
    }

    pub fn style(self, config: &HeaderConfig) -> &HeaderStyle {
        match self {
            Self::Top => &config.top,
            Self::Scrolled => &config.scrolled,
        }
    }

    pub fn apply(self, header: &impl PageElement, config: &HeaderConfig) {
        let style = self.style(config);
        header.put_style("background", style.background);
        header.put_style("box-shadow", style.box_shadow);
    }
}
