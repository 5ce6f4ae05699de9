//! Pomodoro countdown.
//!
//! A second-resolution state machine. It does not run on its own thread;
//! the host calls `advance(now_ms)` and the owned [`Interval`] decides how
//! many one-second ticks have elapsed.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Active --pause--> Idle
//!                 Active --tick reaches 0--> Idle (remaining reset to duration)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = CountdownTimer::new(1500);
//! timer.start(clock.now_ms());
//! // In a loop:
//! for event in timer.advance(clock.now_ms()) { /* CountdownCompleted */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::interval::Interval;
use crate::events::Event;

/// 25 minutes.
pub const DEFAULT_DURATION_SECS: u64 = 25 * 60;
pub const COUNTDOWN_TICK_MS: u64 = 1000;

/// Published countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    pub remaining_secs: u64,
    pub running: bool,
}

#[derive(Debug, Clone)]
pub struct CountdownTimer {
    duration_secs: u64,
    remaining_secs: u64,
    running: bool,
    /// Part of the current second already run before a pause.
    carry_ms: u64,
    interval: Interval,
}

impl CountdownTimer {
    /// Create an idle countdown. A zero duration is clamped to one second.
    pub fn new(duration_secs: u64) -> Self {
        let duration_secs = duration_secs.max(1);
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            running: false,
            carry_ms: 0,
            interval: Interval::new(COUNTDOWN_TICK_MS),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CountdownState {
        CountdownState {
            remaining_secs: self.remaining_secs,
            running: self.running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    /// `MM:SS`, minutes unbounded.
    pub fn display(&self) -> String {
        format_mm_ss(self.remaining_secs)
    }

    /// 0.0 .. 1.0 of the configured duration elapsed.
    pub fn progress(&self) -> f64 {
        let elapsed = self.duration_secs.saturating_sub(self.remaining_secs);
        (elapsed as f64 / self.duration_secs as f64).clamp(0.0, 1.0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume. A second interrupted by `pause` finishes after only
    /// its remaining milliseconds.
    pub fn start(&mut self, now_ms: u64) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        self.interval.arm(now_ms.saturating_sub(self.carry_ms));
        self.carry_ms = 0;
        debug!(remaining_secs = self.remaining_secs, "countdown started");
        Some(Event::CountdownStarted {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Pause at `now_ms`, keeping the elapsed part of the current second.
    /// Ticks already due should be taken with `advance` first; at most one
    /// of them survives the pause.
    pub fn pause(&mut self, now_ms: u64) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        self.carry_ms = match self.interval.next_due_ms() {
            Some(next) => COUNTDOWN_TICK_MS.saturating_sub(next.saturating_sub(now_ms)),
            None => 0,
        };
        self.interval.cancel();
        debug!(remaining_secs = self.remaining_secs, "countdown paused");
        Some(Event::CountdownPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and restore the configured duration.
    pub fn reset(&mut self) -> Event {
        self.reset_to(self.duration_secs)
    }

    /// Stop and load `secs` (clamped to one second). The configured duration
    /// used after the next completion is unchanged.
    pub fn reset_to(&mut self, secs: u64) -> Event {
        self.running = false;
        self.carry_ms = 0;
        self.interval.cancel();
        self.remaining_secs = secs.max(1);
        Event::CountdownReset {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Change the configured duration. An idle countdown that has not been
    /// touched picks the new value up immediately.
    pub fn set_duration(&mut self, secs: u64) {
        let pristine = !self.running && self.remaining_secs == self.duration_secs;
        self.duration_secs = secs.max(1);
        if pristine {
            self.remaining_secs = self.duration_secs;
        }
    }

    /// One elapsed second. No-op unless running.
    ///
    /// Returns `Some(Event::CountdownCompleted)` when the countdown hits zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.running = false;
        self.carry_ms = 0;
        self.interval.cancel();
        self.remaining_secs = self.duration_secs;
        info!(duration_secs = self.duration_secs, "countdown completed");
        Some(Event::CountdownCompleted {
            duration_secs: self.duration_secs,
            at: Utc::now(),
        })
    }

    /// Run every tick due at `now_ms`. Ticks that fall after a completion in
    /// the same batch are dropped along with the cancelled schedule.
    pub fn advance(&mut self, now_ms: u64) -> Vec<Event> {
        let due = self.interval.take_due(now_ms);
        let mut events = Vec::new();
        for _ in 0..due {
            if !self.running {
                break;
            }
            if let Some(event) = self.tick() {
                events.push(event);
            }
        }
        events
    }

    /// When the next tick is due, if running.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.interval.next_due_ms()
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECS)
    }
}

pub fn format_mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completions(events: &[Event]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, Event::CountdownCompleted { .. }))
            .count()
    }

    #[test]
    fn start_and_pause_are_idempotent() {
        let mut timer = CountdownTimer::default();
        assert!(!timer.is_running());
        assert!(timer.pause(0).is_none());

        assert!(timer.start(0).is_some());
        assert!(timer.start(500).is_none());
        assert!(timer.is_running());

        assert!(timer.pause(600).is_some());
        assert!(timer.pause(700).is_none());
        assert_eq!(timer.remaining_secs(), DEFAULT_DURATION_SECS);
    }

    #[test]
    fn tick_is_noop_while_idle() {
        let mut timer = CountdownTimer::new(10);
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining_secs(), 10);
    }

    #[test]
    fn default_scenario_completes_once() {
        let mut timer = CountdownTimer::default();
        timer.start(0);
        let mut events = Vec::new();
        for s in 1..=1500u64 {
            events.extend(timer.advance(s * 1000));
        }
        assert_eq!(completions(&events), 1);
        assert_eq!(
            timer.state(),
            CountdownState {
                remaining_secs: 1500,
                running: false
            }
        );
    }

    #[test]
    fn batch_advance_drops_ticks_past_completion() {
        let mut timer = CountdownTimer::new(3);
        timer.start(0);
        let events = timer.advance(60_000);
        assert_eq!(completions(&events), 1);
        assert_eq!(timer.remaining_secs(), 3);
        assert!(!timer.is_running());
        assert!(timer.advance(120_000).is_empty());
    }

    #[test]
    fn pause_resume_counts_whole_running_seconds() {
        let mut timer = CountdownTimer::new(100);
        timer.start(0);
        timer.advance(2_500);
        assert_eq!(timer.remaining_secs(), 98);
        timer.pause(2_500);
        assert!(timer.advance(9_000).is_empty());
        assert_eq!(timer.remaining_secs(), 98);
        timer.start(10_000);
        timer.advance(10_499);
        assert_eq!(timer.remaining_secs(), 98);
        timer.advance(10_500);
        assert_eq!(timer.remaining_secs(), 97);
        timer.advance(13_000);
        assert_eq!(timer.remaining_secs(), 95);
    }

    #[test]
    fn short_pauses_keep_partial_seconds() {
        let mut timer = CountdownTimer::new(100);
        let mut now = 0;
        for _ in 0..10 {
            timer.start(now);
            now += 900;
            timer.advance(now);
            timer.pause(now);
            now += 100;
        }
        assert_eq!(timer.remaining_secs(), 91);
    }

    #[test]
    fn reset_discards_partial_second() {
        let mut timer = CountdownTimer::new(100);
        timer.start(0);
        timer.pause(700);
        timer.reset();
        timer.start(1_000);
        assert!(timer.advance(1_999).is_empty());
        assert_eq!(timer.remaining_secs(), 100);
        timer.advance(2_000);
        assert_eq!(timer.remaining_secs(), 99);
    }

    #[test]
    fn reset_to_custom_then_completion_restores_duration() {
        let mut timer = CountdownTimer::new(1500);
        timer.reset_to(2);
        assert_eq!(timer.remaining_secs(), 2);
        timer.start(0);
        let events = timer.advance(2_000);
        assert_eq!(completions(&events), 1);
        assert_eq!(timer.remaining_secs(), 1500);
    }

    #[test]
    fn zero_durations_are_clamped() {
        let mut timer = CountdownTimer::new(0);
        assert_eq!(timer.duration_secs(), 1);
        timer.reset_to(0);
        assert_eq!(timer.remaining_secs(), 1);
    }

    #[test]
    fn display_and_progress() {
        let mut timer = CountdownTimer::new(1500);
        assert_eq!(timer.display(), "25:00");
        assert_eq!(timer.progress(), 0.0);
        timer.reset_to(750);
        assert_eq!(timer.display(), "12:30");
        assert!((timer.progress() - 0.5).abs() < f64::EPSILON);
        assert_eq!(format_mm_ss(5), "00:05");
    }

    #[test]
    fn set_duration_updates_untouched_timer() {
        let mut timer = CountdownTimer::new(1500);
        timer.set_duration(600);
        assert_eq!(timer.remaining_secs(), 600);
        timer.reset_to(30);
        timer.set_duration(900);
        assert_eq!(timer.remaining_secs(), 30);
    }
}
