//! Autoplay scheduling

use tracing::trace;

use crate::config::SliderConfig;
use crate::state::SliderState;
use crate::timer::{Scheduler, TaskHandle, TaskKind};

/// What an autoplay tick should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayTick {
    /// Step forward through the state machine
    Advance,
    /// The last page of a non-looping slider is showing; stop the timer
    Stop,
}

pub fn tick_decision(state: &SliderState) -> AutoplayTick {
    if state.is_last_page() && !state.config.loop_around {
        AutoplayTick::Stop
    } else {
        AutoplayTick::Advance
    }
}

/// The autoplay timer handle, if one is armed
#[derive(Debug, Default)]
pub struct AutoplayTimer {
    handle: Option<TaskHandle>,
}

impl AutoplayTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn owns(&self, handle: TaskHandle) -> bool {
        self.handle == Some(handle)
    }

    /// Arm the periodic timer. Returns true only when a timer was created.
    pub fn start<S>(&mut self, config: &SliderConfig, scheduler: &mut S) -> bool
    where
        S: Scheduler + ?Sized,
    {
        if !config.autoplay || self.handle.is_some() {
            return false;
        }
        let handle = scheduler.schedule_repeating(TaskKind::Autoplay, config.playback_interval());
        trace!("autoplay armed as {} every {:?}", handle, config.playback_interval());
        self.handle = Some(handle);
        true
    }

    /// Cancel the timer. Returns true only when one was running.
    pub fn stop<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: Scheduler + ?Sized,
    {
        match self.handle.take() {
            Some(handle) => {
                scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }
}
