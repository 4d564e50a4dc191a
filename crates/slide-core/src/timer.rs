//! Cancellable scheduled tasks
//!
//! The engine never sleeps. It asks a [`Scheduler`] to call it back and is
//! told which handle fired through [`SliderEngine::on_timer`]. Handles that
//! were cancelled or replaced are ignored when they come back.
//!
//! [`SliderEngine::on_timer`]: crate::navigation::SliderEngine::on_timer

use std::fmt;
use std::time::Duration;

use tracing::trace;

/// Opaque handle of one scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(pub u64);

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// What a task is for; used for diagnostics only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Release the movement lock after a transition
    Unlock,
    /// Periodic autoplay tick
    Autoplay,
    /// End of the resize quiescence window
    ResizeDebounce,
}

/// Timer service provided by the host event loop
pub trait Scheduler: Send {
    /// Fire once after `delay`
    fn schedule(&mut self, kind: TaskKind, delay: Duration) -> TaskHandle;

    /// Fire every `period`, first after one full period
    fn schedule_repeating(&mut self, kind: TaskKind, period: Duration) -> TaskHandle;

    /// Cancel a task; unknown or finished handles are ignored
    fn cancel(&mut self, handle: TaskHandle);
}

#[derive(Debug, Clone)]
struct PendingTask {
    handle: TaskHandle,
    kind: TaskKind,
    due: Duration,
    period: Option<Duration>,
}

/// Virtual-clock scheduler.
///
/// Nothing fires on its own; [`ManualScheduler::next_due`] hands out due tasks
/// in deadline order while the caller moves the clock forward.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTask>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of armed tasks
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Pop the earliest task due at or before `until`, moving the clock to its
    /// deadline. Repeating tasks are re-armed for their next period.
    pub fn next_due(&mut self, until: Duration) -> Option<TaskHandle> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= until)
            .min_by_key(|(_, task)| (task.due, task.handle))
            .map(|(index, _)| index)?;

        let PendingTask {
            handle,
            kind,
            due,
            period,
        } = self.pending[index].clone();
        self.now = self.now.max(due);
        trace!("{} ({:?}) fired at {:?}", handle, kind, self.now);

        match period {
            Some(period) => self.pending[index].due += period,
            None => {
                self.pending.remove(index);
            }
        }

        Some(handle)
    }

    /// Move the clock to `to` without firing anything
    pub fn set_now(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    fn allocate(&mut self) -> TaskHandle {
        self.next_id += 1;
        TaskHandle(self.next_id)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, kind: TaskKind, delay: Duration) -> TaskHandle {
        let handle = self.allocate();
        self.pending.push(PendingTask {
            handle,
            kind,
            due: self.now + delay,
            period: None,
        });
        handle
    }

    fn schedule_repeating(&mut self, kind: TaskKind, period: Duration) -> TaskHandle {
        let handle = self.allocate();
        self.pending.push(PendingTask {
            handle,
            kind,
            due: self.now + period,
            period: Some(period),
        });
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.pending.retain(|task| task.handle != handle);
    }
}
