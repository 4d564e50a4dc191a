use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::gesture::GestureSample;
use crate::navigation::{Direction, Origin, SliderSubscriber};
use crate::state::{SliderId, SliderState};

/// Kinds of notification a slider publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Ready,
    Change,
    Resize,
    SwipeStart,
    SwipeEnd,
    AutoplayStart,
    AutoplayStop,
    Destroy,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Ready => "ready",
            EventKind::Change => "change",
            EventKind::Resize => "resize",
            EventKind::SwipeStart => "swipestart",
            EventKind::SwipeEnd => "swipeend",
            EventKind::AutoplayStart => "autoplaystart",
            EventKind::AutoplayStop => "autoplaystop",
            EventKind::Destroy => "destroy",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operation-specific part of a notification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    None,
    Change {
        direction: Direction,
        origin: Origin,
    },
    Resize {
        old_visible_count: usize,
        new_visible_count: usize,
        has_rerendered: bool,
    },
    Swipe(GestureSample),
    Autoplay {
        interval_ms: u64,
    },
}

/// A published notification: who, what, and the state at that moment
#[derive(Debug, Clone, Serialize)]
pub struct SliderEvent {
    pub widget: SliderId,
    pub kind: EventKind,
    pub state: SliderState,
    pub payload: EventPayload,
}

impl SliderEvent {
    /// Event name as seen by the host, `"<id>:<kind>"` when ids are prepended
    pub fn qualified_name(&self) -> String {
        if self.state.config.prepend_id {
            format!("{}:{}", self.widget, self.kind)
        } else {
            self.kind.name().to_string()
        }
    }
}

/// Fan-out of slider notifications to subscribers.
///
/// Cloning shares the subscriber list, so a host can keep a handle for
/// subscribing after the engine has moved into its event loop.
#[derive(Clone, Default)]
pub struct EventNotifier {
    subscribers: Arc<Mutex<Vec<Box<dyn SliderSubscriber>>>>,
}

impl EventNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: Box<dyn SliderSubscriber>) {
        self.subscribers.lock().push(subscriber);
    }

    /// Publish an event to every subscriber, in subscription order
    pub fn publish(&self, event: &SliderEvent) {
        let subscribers = self.subscribers.lock();
        for subscriber in subscribers.iter() {
            subscriber.on_slider_event(event);
        }
    }

    /// Detach all subscribers
    pub fn clear(&self) {
        self.subscribers.lock().clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl fmt::Debug for EventNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Subscriber that keeps every event it sees
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<SliderEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boxed handle sharing this recorder's storage
    pub fn subscriber(&self) -> Box<dyn SliderSubscriber> {
        Box::new(self.clone())
    }

    pub fn events(&self) -> Vec<SliderEvent> {
        self.events.lock().clone()
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().iter().map(|event| event.kind).collect()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events.lock().iter().filter(|event| event.kind == kind).count()
    }

    pub fn last(&self) -> Option<SliderEvent> {
        self.events.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl SliderSubscriber for EventRecorder {
    fn on_slider_event(&self, event: &SliderEvent) {
        self.events.lock().push(event.clone());
    }
}
