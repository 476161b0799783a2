//! Per-frame presence classification boundary.
//!
//! The monitor only needs one bit per frame: were open eyes detected?
//! The real computer-vision pipeline lives behind `PresenceClassifier`;
//! the built-in implementation is a brightness heuristic good enough
//! for the synthetic source and for tests.

use crate::capture::Frame;

/// Classifies a single frame as "presence detected" or not.
///
/// Pure with respect to the monitor: no shared state, no I/O.
pub trait PresenceClassifier: Send {
    fn classify(&self, frame: &Frame) -> bool;
}

/// Mean-brightness classifier: a frame brighter than the cutoff counts
/// as presence detected.
pub struct LumaPresenceClassifier {
    cutoff: f32,
}

impl LumaPresenceClassifier {
    pub const DEFAULT_CUTOFF: f32 = 96.0;

    pub fn new(cutoff: f32) -> Self {
        Self { cutoff }
    }
}

impl Default for LumaPresenceClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CUTOFF)
    }
}

impl PresenceClassifier for LumaPresenceClassifier {
    fn classify(&self, frame: &Frame) -> bool {
        frame.mean_luma() >= self.cutoff
    }
}

/// Classifier replaying a fixed boolean sequence, for driving the
/// supervisor through known sample runs in tests.
#[cfg(test)]
pub struct ScriptedClassifier {
    samples: Vec<bool>,
    cursor: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl ScriptedClassifier {
    pub fn new(samples: Vec<bool>) -> Self {
        Self {
            samples,
            cursor: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[cfg(test)]
impl PresenceClassifier for ScriptedClassifier {
    fn classify(&self, _frame: &Frame) -> bool {
        let i = self
            .cursor
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        // Past the end of the script, repeat the last sample.
        *self
            .samples
            .get(i)
            .or_else(|| self.samples.last())
            .unwrap_or(&true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_frame(luma: u8) -> Frame {
        Frame::new(8, 8, vec![luma; 64])
    }

    #[test]
    fn bright_frame_is_present() {
        let classifier = LumaPresenceClassifier::default();
        assert!(classifier.classify(&uniform_frame(200)));
    }

    #[test]
    fn dark_frame_is_absent() {
        let classifier = LumaPresenceClassifier::default();
        assert!(!classifier.classify(&uniform_frame(10)));
    }

    #[test]
    fn cutoff_is_inclusive() {
        let classifier = LumaPresenceClassifier::new(100.0);
        assert!(classifier.classify(&uniform_frame(100)));
        assert!(!classifier.classify(&uniform_frame(99)));
    }

    #[test]
    fn scripted_classifier_replays_then_repeats_last() {
        let frame = uniform_frame(0);
        let scripted = ScriptedClassifier::new(vec![true, false]);
        assert!(scripted.classify(&frame));
        assert!(!scripted.classify(&frame));
        assert!(!scripted.classify(&frame));
    }
}
