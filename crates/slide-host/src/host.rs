//! Host event loop driving one slider

use serde::{Deserialize, Serialize};
use slide_core::{
    Direction, EventNotifier, ItemId, Measure, SliderConfig, SliderEngine, SliderError,
    SliderId, SliderState, SliderSubscriber, TaskHandle,
};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::scheduler::TokioScheduler;

/// Inputs the presentation layer feeds into a running slider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostInput {
    Click { direction: Direction },
    JumpTo { page: usize },
    GestureStart { position: f64 },
    GestureMove { position: f64 },
    GestureEnd,
    Resize,
    StartAutoplay,
    StopAutoplay,
    Reconfigure { config: SliderConfig },
    Destroy,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostError {
    #[error("slider host has shut down")]
    Closed,
}

/// Cloneable sender into a running [`SliderHost`]
#[derive(Debug, Clone)]
pub struct HostHandle {
    inputs: mpsc::Sender<HostInput>,
}

impl HostHandle {
    pub async fn send(&self, input: HostInput) -> Result<(), HostError> {
        self.inputs.send(input).await.map_err(|_| HostError::Closed)
    }

    pub async fn click(&self, direction: Direction) -> Result<(), HostError> {
        self.send(HostInput::Click { direction }).await
    }

    pub async fn jump_to(&self, page: usize) -> Result<(), HostError> {
        self.send(HostInput::JumpTo { page }).await
    }

    pub async fn gesture_start(&self, position: f64) -> Result<(), HostError> {
        self.send(HostInput::GestureStart { position }).await
    }

    pub async fn gesture_move(&self, position: f64) -> Result<(), HostError> {
        self.send(HostInput::GestureMove { position }).await
    }

    pub async fn gesture_end(&self) -> Result<(), HostError> {
        self.send(HostInput::GestureEnd).await
    }

    /// Signal a viewport change
    pub async fn resize(&self) -> Result<(), HostError> {
        self.send(HostInput::Resize).await
    }

    pub async fn start_autoplay(&self) -> Result<(), HostError> {
        self.send(HostInput::StartAutoplay).await
    }

    pub async fn stop_autoplay(&self) -> Result<(), HostError> {
        self.send(HostInput::StopAutoplay).await
    }

    pub async fn reconfigure(&self, config: SliderConfig) -> Result<(), HostError> {
        self.send(HostInput::Reconfigure { config }).await
    }

    pub async fn destroy(&self) -> Result<(), HostError> {
        self.send(HostInput::Destroy).await
    }

    pub fn is_closed(&self) -> bool {
        self.inputs.is_closed()
    }
}

const INPUT_CAPACITY: usize = 64;

/// Owns a slider engine and feeds it inputs and fired timers, one at a time
pub struct SliderHost {
    engine: SliderEngine<TokioScheduler>,
    inputs: mpsc::Receiver<HostInput>,
    fired: mpsc::UnboundedReceiver<TaskHandle>,
}

impl SliderHost {
    /// Build a host. Nothing runs until [`SliderHost::run`] is awaited.
    pub fn new(
        id: SliderId,
        items: Vec<ItemId>,
        config: SliderConfig,
        measure: Box<dyn Measure>,
    ) -> Result<(Self, HostHandle), SliderError> {
        let (scheduler, fired) = TokioScheduler::new();
        let engine = SliderEngine::new(id, items, config, measure, scheduler)?;
        let (sender, inputs) = mpsc::channel(INPUT_CAPACITY);

        let host = Self {
            engine,
            inputs,
            fired,
        };
        Ok((host, HostHandle { inputs: sender }))
    }

    /// Subscriber list of the hosted engine
    pub fn notifier(&self) -> EventNotifier {
        self.engine.notifier()
    }

    pub fn subscribe(&self, subscriber: Box<dyn SliderSubscriber>) {
        self.engine.subscribe(subscriber);
    }

    /// Mount the slider and process inputs until it is destroyed or every
    /// handle is dropped. Returns the final state.
    pub async fn run(mut self) -> SliderState {
        info!("Slider host {} running", self.engine.id());
        self.engine.mount();

        loop {
            tokio::select! {
                input = self.inputs.recv() => match input {
                    Some(HostInput::Destroy) => break,
                    Some(input) => self.handle_input(input),
                    None => {
                        debug!("All handles to {} dropped", self.engine.id());
                        break;
                    }
                },
                Some(handle) = self.fired.recv() => self.engine.on_timer(handle),
            }
        }

        self.engine.destroy();
        self.engine.state().clone()
    }

    fn handle_input(&mut self, input: HostInput) {
        let outcome = match input {
            HostInput::Click { direction } => self.engine.click(direction),
            HostInput::JumpTo { page } => self.engine.jump_to(page),
            HostInput::GestureStart { position } => self.engine.gesture_start(position),
            HostInput::GestureMove { position } => {
                self.engine.gesture_move(position);
                Ok(())
            }
            HostInput::GestureEnd => {
                self.engine.gesture_end();
                Ok(())
            }
            HostInput::Resize => {
                self.engine.viewport_changed();
                Ok(())
            }
            HostInput::StartAutoplay => {
                self.engine.start_autoplay();
                Ok(())
            }
            HostInput::StopAutoplay => {
                self.engine.stop_autoplay();
                Ok(())
            }
            HostInput::Reconfigure { config } => {
                if let Err(error) = self.engine.reconfigure(config) {
                    warn!("Slider {} kept its configuration: {}", self.engine.id(), error);
                }
                Ok(())
            }
            HostInput::Destroy => {
                self.engine.destroy();
                Ok(())
            }
        };

        if let Err(rejection) = outcome {
            debug!("Slider {} input rejected: {}", self.engine.id(), rejection);
        }
    }
}

