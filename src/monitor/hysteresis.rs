//! Debounced sleep/awake state machine.
//!
//! Converts the jittery per-frame presence bit into a stable two-state
//! signal. The hysteresis is deliberately asymmetric: declaring sleep
//! takes more than `threshold` consecutive absent samples, while a
//! single present sample wakes the machine immediately.

use serde::{Deserialize, Serialize};

/// Default consecutive-absent-sample threshold before declaring sleep
/// (~3 seconds at the default 100 ms sampling interval).
pub const DEFAULT_THRESHOLD: u32 = 30;

/// The debounced liveness state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LivenessState {
    Awake,
    Asleep,
}

impl LivenessState {
    pub fn is_sleeping(self) -> bool {
        matches!(self, LivenessState::Asleep)
    }
}

/// Result of feeding one sample into the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State after this sample.
    pub state: LivenessState,
    /// True exactly on the sample that moved Awake -> Asleep, never
    /// while the machine stays asleep.
    pub alert_edge: bool,
}

/// Two-state machine with a consecutive-absence counter as hidden
/// memory. Transitions are total and deterministic; there is no
/// terminal state.
#[derive(Debug)]
pub struct HysteresisStateMachine {
    threshold: u32,
    absent_streak: u32,
    state: LivenessState,
}

impl HysteresisStateMachine {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            absent_streak: 0,
            state: LivenessState::Awake,
        }
    }

    /// Feed one presence sample and get the debounced state plus the
    /// edge flag for this sample.
    pub fn update(&mut self, presence_detected: bool) -> Transition {
        let previous = self.state;

        if presence_detected {
            self.absent_streak = 0;
            self.state = LivenessState::Awake;
        } else {
            self.absent_streak = self.absent_streak.saturating_add(1);
            if self.absent_streak > self.threshold {
                self.state = LivenessState::Asleep;
            }
        }

        Transition {
            state: self.state,
            alert_edge: previous == LivenessState::Awake && self.state == LivenessState::Asleep,
        }
    }

    pub fn state(&self) -> LivenessState {
        self.state
    }

    /// Current run length of consecutive absent samples.
    pub fn absent_streak(&self) -> u32 {
        self.absent_streak
    }
}

impl Default for HysteresisStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
