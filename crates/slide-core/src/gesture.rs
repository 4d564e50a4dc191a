//! Drag gesture interpretation
//!
//! Only the start and end positions matter. Intermediate moves are recorded
//! so the presentation layer can follow the pointer, but never decide.

use serde::Serialize;

use crate::navigation::Direction;
use crate::pagination::is_at_boundary;
use crate::state::SliderState;

/// Pointer positions of one gesture along the sliding axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GestureSample {
    pub start: f64,
    pub end: Option<f64>,
    pub threshold: f64,
}

impl GestureSample {
    /// Signed travel, positive towards the end of the axis
    pub fn distance(&self) -> Option<f64> {
        self.end.map(|end| end - self.start)
    }
}

/// Holds the sample of the gesture in progress, if any
#[derive(Debug, Default)]
pub struct GestureTracker {
    sample: Option<GestureSample>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking; non-finite positions are ignored
    pub fn begin(&mut self, position: f64, threshold: f64) -> Option<GestureSample> {
        if !position.is_finite() {
            return None;
        }
        let sample = GestureSample {
            start: position,
            end: None,
            threshold,
        };
        self.sample = Some(sample);
        Some(sample)
    }

    /// Record the latest pointer position of the current gesture
    pub fn record(&mut self, position: f64) {
        if let Some(sample) = self.sample.as_mut() {
            if position.is_finite() {
                sample.end = Some(position);
            }
        }
    }

    /// End the gesture, handing back its sample and resetting the tracker
    pub fn finish(&mut self) -> Option<GestureSample> {
        self.sample.take()
    }

    pub fn current(&self) -> Option<&GestureSample> {
        self.sample.as_ref()
    }

    pub fn reset(&mut self) {
        self.sample = None;
    }
}

/// Navigation implied by a finished gesture.
///
/// Dragging towards the end of the axis reveals earlier items, so a positive
/// distance means `Previous`. Short drags and drags past a non-looping
/// boundary resolve to nothing.
pub fn resolve(sample: &GestureSample, state: &SliderState) -> Option<Direction> {
    let distance = sample.distance()?;
    if distance.abs() <= sample.threshold {
        return None;
    }

    let direction = if distance > 0.0 {
        Direction::Previous
    } else {
        Direction::Next
    };

    let blocked = !state.config.loop_around
        && is_at_boundary(direction, state.current_page, state.total_page);
    (!blocked).then_some(direction)
}
