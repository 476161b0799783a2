//! Shared latest-value status register.
//!
//! A single writer (the acquisition loop) overwrites the snapshot; any
//! number of readers (the HTTP handlers, tests) take copies. No
//! history, no queuing.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::monitor::LivenessState;

/// Snapshot exposed on the wire by `GET /status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PublishedStatus {
    pub sleeping: bool,
}

/// Concurrency-safe holder of the most recently published status.
///
/// Cheap to clone; all clones share the same snapshot. The lock is
/// only ever held for the copy itself, never across I/O.
#[derive(Clone, Default)]
pub struct StatusPublisher {
    inner: Arc<RwLock<PublishedStatus>>,
}

impl StatusPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the snapshot. Atomic with respect to `read`.
    pub fn publish(&self, state: LivenessState) {
        self.inner.write().sleeping = state.is_sleeping();
    }

    /// Most recently published snapshot; before the first publish this
    /// is the `{ sleeping: false }` default. Never blocks on a writer
    /// doing I/O.
    pub fn read(&self) -> PublishedStatus {
        *self.inner.read()
    }
}
