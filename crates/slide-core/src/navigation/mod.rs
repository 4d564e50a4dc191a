use serde::{Deserialize, Serialize};
use thiserror::Error;

mod engine;
pub mod machine;
mod subscriber;

pub use engine::SliderEngine;
pub use machine::{Effect, Transition};
pub use subscriber::{subscriber_from_fn, SliderSubscriber};

/// Direction of a move along the item sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Previous => "previous",
            Direction::Next => "next",
        }
    }
}

/// Where a navigation command came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// Previous/next buttons
    Controls,
    /// Pagination markers
    PaginationDots,
    /// Drag or touch gesture
    Swipe,
    /// Autoplay timer
    Autoplay,
    /// Programmatic call by the host
    Api,
}

/// Navigation commands accepted by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Step one window in a direction
    Advance { direction: Direction, origin: Origin },
    /// Show a page directly; `direction` is only notification metadata
    JumpTo {
        page: usize,
        direction: Option<Direction>,
        origin: Origin,
    },
    /// A decisive swipe
    GestureResolved(Direction),
}

impl Command {
    pub fn origin(&self) -> Origin {
        match self {
            Command::Advance { origin, .. } | Command::JumpTo { origin, .. } => *origin,
            Command::GestureResolved(_) => Origin::Swipe,
        }
    }
}

/// Why a command was dropped. Dropped commands leave the state untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("slider has no valid measurement yet")]
    NotReady,

    #[error("a transition is in progress")]
    Transitioning,

    #[error("already at the {0:?} boundary and looping is off")]
    AtBoundary(Direction),

    #[error("gestures are disabled")]
    GesturesDisabled,

    #[error("slider was torn down")]
    TornDown,
}
