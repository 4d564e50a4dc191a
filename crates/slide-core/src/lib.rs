//! Core functionality for the slide engine
//!
//! This crate holds the slider navigation state machine and everything it
//! needs: page and window math, gesture resolution, resize reconciliation,
//! autoplay and the event notifier. Timers and measurements are injected so
//! the engine runs the same under a host event loop and in tests.

pub mod autoplay;
pub mod config;
pub mod events;
pub mod gesture;
pub mod navigation;
pub mod pagination;
pub mod presentation;
pub mod resize;
pub mod state;
pub mod timer;
pub mod window;

use thiserror::Error;

// Re-export commonly used types
pub use config::{ConfigError, PaginationStyle, SliderConfig, SliderStyle};
pub use events::{EventKind, EventNotifier, EventPayload, EventRecorder, SliderEvent};
pub use navigation::{
    subscriber_from_fn, Command, Direction, Origin, Rejection, SliderEngine, SliderSubscriber,
};
pub use presentation::{ControlState, PaginationView, RenderPlan, SlideRole};
pub use resize::{FixedMeasure, LayoutMeasure, Measure, SharedMeasure};
pub use state::{ItemId, SliderId, SliderState};
pub use timer::{ManualScheduler, Scheduler, TaskHandle, TaskKind};

/// Errors raised while building or reconfiguring a slider
#[derive(Error, Debug)]
pub enum SliderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Slider has no items")]
    NoItems,

    #[error("Duplicate item id: {0}")]
    DuplicateItem(ItemId),
}
