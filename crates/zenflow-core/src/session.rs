//! Completed-pomodoro counter.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCounter {
    count: u64,
}

impl SessionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a persisted value. Negative values become zero.
    pub fn load(initial: i64) -> Self {
        Self {
            count: initial.max(0) as u64,
        }
    }

    pub fn increment(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}
