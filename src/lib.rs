//! Vigil - debounced sleep/awake liveness monitor.
//!
//! Samples a frame source, classifies each frame for eye presence, and
//! debounces the noisy per-frame signal into a stable sleeping/awake
//! state served on a minimal polling endpoint.
//!
//! Pipeline: `FrameSource` -> `PresenceClassifier` ->
//! `HysteresisStateMachine` -> `StatusPublisher` -> `GET /status` ->
//! display client.

pub mod capture;
pub mod classifier;
pub mod cli;
pub mod display;
pub mod error;
pub mod monitor;
pub mod server;
pub mod settings;
pub mod status;

pub use error::{Result, VigilError};
pub use monitor::{AcquisitionSupervisor, HysteresisStateMachine, LivenessState};
pub use status::{PublishedStatus, StatusPublisher};
