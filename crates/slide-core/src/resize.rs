//! Resize reconciliation
//!
//! The visible count comes from the presentation layer through [`Measure`].
//! After a viewport change settles, the engine measures again and, if the
//! count moved, restarts navigation from the first page.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::SliderStyle;
use crate::pagination::total_pages;
use crate::state::{ItemId, SliderState};
use crate::window::{compute_window, WindowRequest};

/// Source of the raw visible-item count.
///
/// Values that are not finite or floor to zero mean "not measurable yet".
pub trait Measure: Send {
    fn visible_count(&self) -> f64;
}

impl<F> Measure for F
where
    F: Fn() -> f64 + Send,
{
    fn visible_count(&self) -> f64 {
        self()
    }
}

/// Count derived from container, item and gap widths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMeasure {
    pub container_width: f64,
    pub item_width: f64,
    pub gap: f64,
}

impl Measure for LayoutMeasure {
    fn visible_count(&self) -> f64 {
        (self.container_width / (self.item_width + self.gap)).floor()
    }
}

/// A measurement that never changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMeasure(pub f64);

impl Measure for FixedMeasure {
    fn visible_count(&self) -> f64 {
        self.0
    }
}

/// A measurement the host can update while the engine owns a clone
#[derive(Debug, Clone, Default)]
pub struct SharedMeasure {
    value: Arc<Mutex<f64>>,
}

impl SharedMeasure {
    pub fn new(value: f64) -> Self {
        Self {
            value: Arc::new(Mutex::new(value)),
        }
    }

    pub fn set(&self, value: f64) {
        *self.value.lock() = value;
    }

    pub fn get(&self) -> f64 {
        *self.value.lock()
    }
}

impl Measure for SharedMeasure {
    fn visible_count(&self) -> f64 {
        self.get()
    }
}

/// Turn a raw measurement into a usable count
pub fn validate_measurement(raw: f64) -> Option<usize> {
    if !raw.is_finite() {
        return None;
    }
    let floored = raw.floor();
    if floored < 1.0 {
        return None;
    }
    Some(floored.min(usize::MAX as f64) as usize)
}

/// Measure the visible count for a style; single-item styles always show one
pub fn measure_visible_count(style: SliderStyle, measure: &dyn Measure) -> Option<usize> {
    if style.is_single_item() {
        return Some(1);
    }
    validate_measurement(measure.visible_count())
}

/// Result of reconciling a new measurement
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeOutcome {
    pub state: SliderState,
    pub old_visible_count: usize,
    pub new_visible_count: usize,
    pub has_rerendered: bool,
}

/// State at the first page for a given visible count
pub fn first_page_state(state: &SliderState, items: &[ItemId], visible_count: usize) -> SliderState {
    SliderState {
        is_ready: true,
        visible_count,
        current_window: compute_window(items, &[], WindowRequest::FromStart, visible_count),
        current_page: 1,
        total_page: total_pages(items.len(), visible_count),
        offset: 0,
        ..state.clone()
    }
}

/// Reconcile `state` with a valid measurement.
///
/// The movement lock is carried over untouched.
pub fn reconcile(state: &SliderState, items: &[ItemId], measured: usize) -> ResizeOutcome {
    let old_visible_count = state.visible_count;

    // A suspended slider whose count came back unchanged keeps its page
    if state.visible_count > 0 && measured == old_visible_count {
        return ResizeOutcome {
            state: SliderState {
                is_ready: true,
                ..state.clone()
            },
            old_visible_count,
            new_visible_count: measured,
            has_rerendered: false,
        };
    }

    ResizeOutcome {
        state: first_page_state(state, items, measured),
        old_visible_count,
        new_visible_count: measured,
        has_rerendered: true,
    }
}
