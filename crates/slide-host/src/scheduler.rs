//! Scheduler backed by tokio timers

use std::time::Duration;

use ahash::AHashMap;
use slide_core::{Scheduler, TaskHandle, TaskKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

/// Runs every task as a spawned tokio task that reports its handle back over
/// a channel when it fires.
///
/// Must be used from within a tokio runtime.
pub struct TokioScheduler {
    next_id: u64,
    tasks: AHashMap<TaskHandle, JoinHandle<()>>,
    fired: mpsc::UnboundedSender<TaskHandle>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its fired handles arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TaskHandle>) {
        let (fired, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            next_id: 0,
            tasks: AHashMap::new(),
            fired,
        };
        (scheduler, receiver)
    }

    /// Tasks that are armed and not yet finished
    pub fn active(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }

    fn allocate(&mut self) -> TaskHandle {
        self.tasks.retain(|_, task| !task.is_finished());
        self.next_id += 1;
        TaskHandle(self.next_id)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, kind: TaskKind, delay: Duration) -> TaskHandle {
        let handle = self.allocate();
        let fired = self.fired.clone();

        let task = tokio::spawn(async move {
            time::sleep(delay).await;
            trace!("{} ({:?}) fired", handle, kind);
            let _ = fired.send(handle);
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn schedule_repeating(&mut self, kind: TaskKind, period: Duration) -> TaskHandle {
        let handle = self.allocate();
        let fired = self.fired.clone();

        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                trace!("{} ({:?}) ticked", handle, kind);
                if fired.send(handle).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            trace!("{} cancelled", handle);
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
