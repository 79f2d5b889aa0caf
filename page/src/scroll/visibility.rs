//! One-way visibility tracking of the animated sections.

use std::cell::RefCell;

/// When an observed element counts as visible.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityOptions {
    /// Fraction of the element that must be inside the observed region.
    pub threshold: f64,

    /// Pixels cut from the bottom of the viewport.
    pub bottom_margin: f64,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 50.,
        }
    }
}

impl VisibilityOptions {
    /// The `rootMargin` of an `IntersectionObserver`.
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin)
    }

    /// Fraction of a box, given relative to the viewport, that lies inside the
    /// viewport shrunk by the bottom margin.
    pub fn intersection_ratio(&self, top: f64, height: f64, viewport_height: f64) -> f64 {
        let root_bottom = (viewport_height - self.bottom_margin).max(0.);
        if height <= 0. {
            return if (0. ..=root_bottom).contains(&top) {
                1.
            } else {
                0.
            };
        }
        let visible = (top + height).min(root_bottom) - top.max(0.);
        (visible.max(0.) / height).min(1.)
    }

    pub fn is_intersecting(&self, top: f64, height: f64, viewport_height: f64) -> bool {
        self.intersection_ratio(top, height, viewport_height) >= self.threshold
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionState {
    NotYetVisible,
    Visible,
}

/// The [SectionState] of every observed element.
#[derive(Debug)]
pub struct VisibilityTracker<E> {
    sections: RefCell<Vec<(E, SectionState)>>,
}

impl<E: PartialEq + Clone> VisibilityTracker<E> {
    pub fn track(&self, element: &E) {
        let mut sections = self.sections.borrow_mut();
        if !sections.iter().any(|(tracked, _)| tracked == element) {
            sections.push((element.clone(), SectionState::NotYetVisible));
        }
    }

    pub fn state(&self, element: &E) -> Option<SectionState> {
        self.sections
            .borrow()
            .iter()
            .find(|(tracked, _)| tracked == element)
            .map(|(_, state)| *state)
    }

    /// Moves the element to [SectionState::Visible].
    ///
    /// Returns true only for the transition itself, never for an element that
    /// is untracked or already visible.
    pub fn reveal(&self, element: &E) -> bool {
        let mut sections = self.sections.borrow_mut();
        let Some((_, state)) = sections.iter_mut().find(|(tracked, _)| tracked == element) else {
            return false;
        };
        if *state == SectionState::Visible {
            return false;
        }
        *state = SectionState::Visible;
        true
    }

    pub fn len(&self) -> usize {
        self.sections.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.borrow().is_empty()
    }
}

impl<E> Default for VisibilityTracker<E> {
    fn default() -> Self {
        Self {
            sections: RefCell::default(),
        }
    }
}
