//! Slider engine implementation

use std::time::Duration;

use ahash::AHashSet;
use tracing::{debug, info, trace};

use super::machine::{request_gesture_move, request_move, with_lock, Effect, Transition};
use super::{Command, Direction, Origin, Rejection, SliderSubscriber};
use crate::autoplay::{tick_decision, AutoplayTick, AutoplayTimer};
use crate::config::SliderConfig;
use crate::events::{EventKind, EventNotifier, EventPayload, SliderEvent};
use crate::gesture::{self, GestureTracker};
use crate::presentation::{self, ControlState, PaginationView, RenderPlan};
use crate::resize::{measure_visible_count, reconcile, Measure};
use crate::state::{ItemId, SliderId, SliderState};
use crate::timer::{ManualScheduler, Scheduler, TaskHandle, TaskKind};
use crate::SliderError;

/// The slider engine.
///
/// Owns the state and every timer slot. All inputs (controls, gestures,
/// autoplay ticks, resize signals, fired timers) come in through `&mut self`
/// methods, so one host event loop drives it without locking.
pub struct SliderEngine<S: Scheduler = ManualScheduler> {
    id: SliderId,
    items: Vec<ItemId>,
    state: SliderState,
    measure: Box<dyn Measure>,
    scheduler: S,
    notifier: EventNotifier,
    gesture: GestureTracker,
    /// The gesture in progress took the movement lock
    gesture_lock: bool,
    autoplay: AutoplayTimer,
    unlock_task: Option<TaskHandle>,
    resize_task: Option<TaskHandle>,
    ready_announced: bool,
    torn_down: bool,
}

impl<S: Scheduler> SliderEngine<S> {
    /// Create an engine. Nothing is measured or published until [`mount`].
    ///
    /// [`mount`]: SliderEngine::mount
    pub fn new(
        id: SliderId,
        items: Vec<ItemId>,
        config: SliderConfig,
        measure: Box<dyn Measure>,
        scheduler: S,
    ) -> Result<Self, SliderError> {
        config.validate()?;

        if items.is_empty() {
            return Err(SliderError::NoItems);
        }

        let mut seen = AHashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item) {
                return Err(SliderError::DuplicateItem(item.clone()));
            }
        }

        let state = SliderState::unmeasured(items.len(), config);

        Ok(Self {
            id,
            items,
            state,
            measure,
            scheduler,
            notifier: EventNotifier::new(),
            gesture: GestureTracker::new(),
            gesture_lock: false,
            autoplay: AutoplayTimer::new(),
            unlock_task: None,
            resize_task: None,
            ready_announced: false,
            torn_down: false,
        })
    }

    pub fn id(&self) -> &SliderId {
        &self.id
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Current state snapshot
    pub fn state(&self) -> &SliderState {
        &self.state
    }

    /// Items currently visible
    pub fn window(&self) -> &[ItemId] {
        &self.state.current_window
    }

    /// Handle sharing this engine's subscriber list
    pub fn notifier(&self) -> EventNotifier {
        self.notifier.clone()
    }

    pub fn subscribe(&self, subscriber: Box<dyn SliderSubscriber>) {
        self.notifier.subscribe(subscriber);
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_running()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Take the first measurement, publish `ready` and start autoplay.
    ///
    /// Without a usable measurement the slider stays not ready until a
    /// resize brings one.
    pub fn mount(&mut self) {
        if self.torn_down || self.state.is_ready {
            return;
        }

        info!("Mounting slider {} with {} items", self.id, self.items.len());
        self.reconcile_resize(false);
    }

    /// Previous/next button press
    pub fn click(&mut self, direction: Direction) -> Result<(), Rejection> {
        self.advance(direction, Origin::Controls)
    }

    /// Step one window in `direction`
    pub fn advance(&mut self, direction: Direction, origin: Origin) -> Result<(), Rejection> {
        self.dispatch(Command::Advance { direction, origin })
    }

    /// Pagination marker press; `page` is 1-indexed and clamped
    pub fn jump_to(&mut self, page: usize) -> Result<(), Rejection> {
        self.dispatch(Command::JumpTo {
            page,
            direction: None,
            origin: Origin::PaginationDots,
        })
    }

    /// Run a command through the state machine
    pub fn dispatch(&mut self, command: Command) -> Result<(), Rejection> {
        if self.torn_down {
            return Err(Rejection::TornDown);
        }

        let outcome = request_move(&self.state, &self.items, command);
        self.settle(command, outcome)
    }

    fn settle(
        &mut self,
        command: Command,
        outcome: Result<Transition, Rejection>,
    ) -> Result<(), Rejection> {
        match outcome {
            Ok(transition) => {
                debug!(
                    "Slider {} {:?}: page {} -> {}",
                    self.id, command, self.state.current_page, transition.state.current_page
                );
                self.apply(transition);
                Ok(())
            }
            Err(rejection) => {
                debug!("Slider {} dropped {:?}: {}", self.id, command, rejection);
                Err(rejection)
            }
        }
    }

    /// Pointer down on the track
    pub fn gesture_start(&mut self, position: f64) -> Result<(), Rejection> {
        if self.torn_down {
            return Err(Rejection::TornDown);
        }
        if !self.state.config.allow_gesture {
            return Err(Rejection::GesturesDisabled);
        }
        if !self.state.is_ready {
            return Err(Rejection::NotReady);
        }
        if self.state.is_transitioning {
            return Err(Rejection::Transitioning);
        }

        let Some(sample) = self.gesture.begin(position, self.state.config.swipe_threshold) else {
            debug!("Slider {} ignored gesture start at {}", self.id, position);
            return Ok(());
        };

        self.state = with_lock(&self.state, true);
        self.gesture_lock = true;
        self.publish(EventKind::SwipeStart, EventPayload::Swipe(sample));
        Ok(())
    }

    /// Pointer moved during a gesture
    pub fn gesture_move(&mut self, position: f64) {
        if !self.torn_down {
            self.gesture.record(position);
        }
    }

    /// Pointer released; navigates if the gesture was decisive
    pub fn gesture_end(&mut self) {
        if self.torn_down {
            return;
        }

        let Some(sample) = self.gesture.finish() else {
            trace!("Slider {} gesture end without a start", self.id);
            return;
        };

        let owns_lock = std::mem::take(&mut self.gesture_lock);
        let navigated = match gesture::resolve(&sample, &self.state) {
            Some(direction) => {
                let outcome = if owns_lock {
                    request_gesture_move(&self.state, &self.items, direction)
                } else {
                    request_move(&self.state, &self.items, Command::GestureResolved(direction))
                };
                self.settle(Command::GestureResolved(direction), outcome).is_ok()
            }
            None => false,
        };

        if !navigated {
            self.schedule_unlock(self.state.config.transition_duration());
        }

        self.publish(EventKind::SwipeEnd, EventPayload::Swipe(sample));
    }

    /// The viewport changed; reconcile once it has been quiet long enough
    pub fn viewport_changed(&mut self) {
        if self.torn_down {
            return;
        }

        if let Some(pending) = self.resize_task.take() {
            self.scheduler.cancel(pending);
        }
        let debounce = self.state.config.resize_debounce();
        self.resize_task = Some(self.scheduler.schedule(TaskKind::ResizeDebounce, debounce));
    }

    /// A scheduled task fired. Handles that no longer belong to a slot are
    /// ignored.
    pub fn on_timer(&mut self, handle: TaskHandle) {
        if self.torn_down {
            trace!("Slider {} ignoring {} after teardown", self.id, handle);
            return;
        }

        if self.unlock_task == Some(handle) {
            self.unlock_task = None;
            self.state = with_lock(&self.state, false);
            trace!("Slider {} movement lock released", self.id);
        } else if self.resize_task == Some(handle) {
            self.resize_task = None;
            self.reconcile_resize(true);
        } else if self.autoplay.owns(handle) {
            self.autoplay_tick();
        } else {
            trace!("Slider {} ignoring stale {}", self.id, handle);
        }
    }

    /// Start autoplay if configured; publishes `autoplaystart` when a timer
    /// is created
    pub fn start_autoplay(&mut self) -> bool {
        if self.torn_down || !self.state.is_ready {
            return false;
        }

        let started = self.autoplay.start(&self.state.config, &mut self.scheduler);
        if started {
            info!("Slider {} autoplay started", self.id);
            self.publish(
                EventKind::AutoplayStart,
                EventPayload::Autoplay {
                    interval_ms: self.state.config.playback_interval_ms,
                },
            );
        }
        started
    }

    /// Stop autoplay; publishes `autoplaystop` only if it was running
    pub fn stop_autoplay(&mut self) -> bool {
        let stopped = self.autoplay.stop(&mut self.scheduler);
        if stopped {
            info!("Slider {} autoplay stopped", self.id);
            self.publish(
                EventKind::AutoplayStop,
                EventPayload::Autoplay {
                    interval_ms: self.state.config.playback_interval_ms,
                },
            );
        }
        stopped
    }

    /// Replace the configuration.
    ///
    /// Autoplay is stopped, the layout is measured again right away (the
    /// style may change the visible count) and autoplay restarts if enabled.
    pub fn reconfigure(&mut self, config: SliderConfig) -> Result<(), SliderError> {
        if self.torn_down {
            return Ok(());
        }
        config.validate()?;

        self.stop_autoplay();
        self.state = SliderState {
            config,
            ..self.state.clone()
        };
        self.reconcile_resize(true);
        self.start_autoplay();
        Ok(())
    }

    /// Tear the slider down: cancel every task, publish `destroy` and detach
    /// all subscribers. Every later call is a no-op.
    pub fn destroy(&mut self) {
        if self.torn_down {
            return;
        }

        self.autoplay.stop(&mut self.scheduler);
        for task in [self.unlock_task.take(), self.resize_task.take()]
            .into_iter()
            .flatten()
        {
            self.scheduler.cancel(task);
        }
        self.gesture.reset();
        self.gesture_lock = false;

        self.torn_down = true;
        self.state = SliderState {
            is_ready: false,
            is_transitioning: false,
            ..self.state.clone()
        };
        info!("Slider {} destroyed", self.id);
        self.publish(EventKind::Destroy, EventPayload::None);
        self.notifier.clear();
    }

    /// Previous/next availability for the presentation layer
    pub fn controls(&self) -> ControlState {
        presentation::control_state(&self.state)
    }

    pub fn pagination(&self) -> Option<PaginationView> {
        presentation::pagination_view(&self.state)
    }

    pub fn render_plan(&self) -> Option<RenderPlan> {
        presentation::render_plan(&self.state, &self.items)
    }

    fn apply(&mut self, transition: Transition) {
        self.state = transition.state;

        for effect in transition.effects {
            match effect {
                Effect::StopAutoplay => {
                    self.stop_autoplay();
                }
                Effect::Notify { kind, payload } => self.publish(kind, payload),
                Effect::ScheduleUnlock(delay) => self.schedule_unlock(delay),
            }
        }
    }

    fn autoplay_tick(&mut self) {
        if !self.state.is_ready {
            trace!("Slider {} skipping autoplay tick while not ready", self.id);
            return;
        }
        match tick_decision(&self.state) {
            AutoplayTick::Stop => {
                debug!("Slider {} reached its last page, autoplay ends", self.id);
                self.stop_autoplay();
            }
            AutoplayTick::Advance => {
                // A tick that lands while locked is simply lost.
                let _ = self.advance(Direction::Next, Origin::Autoplay);
            }
        }
    }

    fn schedule_unlock(&mut self, delay: Duration) {
        if let Some(pending) = self.unlock_task.take() {
            self.scheduler.cancel(pending);
        }
        self.unlock_task = Some(self.scheduler.schedule(TaskKind::Unlock, delay));
    }

    /// Measure and reconcile. `announce` publishes a `resize` notification;
    /// the first measurement at mount is not a resize.
    ///
    /// An unusable measurement suspends navigation until a usable one arrives.
    fn reconcile_resize(&mut self, announce: bool) {
        let Some(measured) = measure_visible_count(self.state.config.style, self.measure.as_ref())
        else {
            if self.state.is_ready {
                info!("Slider {} lost its measurement, navigation suspended", self.id);
                self.state = SliderState {
                    is_ready: false,
                    ..self.state.clone()
                };
            } else {
                debug!("Slider {} has no usable measurement yet", self.id);
            }
            return;
        };

        let was_ready = self.state.is_ready;
        let outcome = reconcile(&self.state, &self.items, measured);
        self.state = outcome.state;

        if outcome.has_rerendered {
            info!(
                "Slider {} shows {} of {} items per page ({} pages)",
                self.id, measured, self.state.item_count, self.state.total_page
            );
        }

        if !self.ready_announced {
            self.ready_announced = true;
            self.publish(EventKind::Ready, EventPayload::None);
        }

        if announce {
            self.publish(
                EventKind::Resize,
                EventPayload::Resize {
                    old_visible_count: outcome.old_visible_count,
                    new_visible_count: outcome.new_visible_count,
                    has_rerendered: outcome.has_rerendered,
                },
            );
        }

        if !was_ready {
            self.start_autoplay();
        }
    }

    fn publish(&self, kind: EventKind, payload: EventPayload) {
        let event = SliderEvent {
            widget: self.id.clone(),
            kind,
            state: self.state.clone(),
            payload,
        };
        trace!("Slider {} publishing {}", self.id, event.qualified_name());
        self.notifier.publish(&event);
    }
}

impl SliderEngine<ManualScheduler> {
    /// Move the virtual clock forward, firing every task that falls due on
    /// the way in deadline order
    pub fn advance_clock(&mut self, by: Duration) {
        let target = self.scheduler.now() + by;
        while let Some(handle) = self.scheduler.next_due(target) {
            self.on_timer(handle);
        }
        self.scheduler.set_now(target);
    }
}
