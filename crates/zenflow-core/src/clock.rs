//! Time sources and the greeting/date clock panel.
//!
//! Engines never read the system clock themselves. They take a monotonic
//! millisecond reading from a [`Clock`], which lets tests substitute a
//! [`ManualClock`] and step time forward without sleeping.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use chrono::{DateTime, Local, Timelike};
use tracing::debug;

use crate::timer::Interval;

/// Refresh period of the greeting/date panel.
pub const CLOCK_TICK_MS: u64 = 60_000;

/// Monotonic time source in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Milliseconds elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests and simulations.
///
/// Clones share the same reading, so a test can keep one handle and give
/// another to the code under test.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, delta_ms: u64) -> u64 {
        let next = self.now.get().saturating_add(delta_ms);
        self.now.set(next);
        next
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Wall-clock panel: greeting plus date and time lines, refreshed once a
/// minute while started.
#[derive(Debug, Clone)]
pub struct ClockSource {
    current: DateTime<Local>,
    interval: Interval,
}

impl ClockSource {
    pub fn new(current: DateTime<Local>) -> Self {
        Self {
            current,
            interval: Interval::new(CLOCK_TICK_MS),
        }
    }

    pub fn start(&mut self, now_ms: u64) {
        self.interval.arm(now_ms);
    }

    pub fn stop(&mut self) {
        self.interval.cancel();
    }

    pub fn is_started(&self) -> bool {
        self.interval.is_armed()
    }

    /// Refresh the displayed time with `wall` if a minute tick is due.
    /// Returns true when the panel changed.
    pub fn advance(&mut self, now_ms: u64, wall: DateTime<Local>) -> bool {
        if self.interval.take_due(now_ms) == 0 {
            return false;
        }
        debug!(time = %wall.format("%H:%M"), "clock tick");
        self.current = wall;
        true
    }

    pub fn current(&self) -> DateTime<Local> {
        self.current
    }

    pub fn greeting(&self) -> &'static str {
        greeting_for_hour(self.current.hour())
    }

    /// e.g. "Friday, October 16, 2026"
    pub fn date_line(&self) -> String {
        self.current.format("%A, %B %-d, %Y").to_string()
    }

    pub fn time_line(&self) -> String {
        self.current.format("%H:%M").to_string()
    }
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 17 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}
