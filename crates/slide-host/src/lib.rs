//! Tokio host for the slide engine
//!
//! [`SliderHost`] owns one engine and runs it on a single task: inputs from
//! [`HostHandle`]s and fired timers from the [`TokioScheduler`] are handled one
//! at a time, so the engine itself needs no locking.

pub mod host;
pub mod scheduler;

pub use host::{HostError, HostHandle, HostInput, SliderHost};
pub use scheduler::TokioScheduler;
