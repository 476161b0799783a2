//! Liveness monitoring core: debounce state machine, retry policy, and
//! the acquisition supervisor that ties them to a capture source.

mod hysteresis;
mod retry;
mod supervisor;

pub use hysteresis::{HysteresisStateMachine, LivenessState, Transition, DEFAULT_THRESHOLD};
pub use retry::RetryPolicy;
pub use supervisor::{AcquisitionSupervisor, AlertSink, LogAlertSink};
