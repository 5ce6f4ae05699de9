//! Breathing phase sequencer.
//!
//! One repeating tick drives the whole cycle. On each due tick the engine
//! compares time spent in the current phase with that phase's dwell and moves
//! on as many phases as have elapsed. Transitions are stamped at the exact
//! dwell boundary, so tick resolution only delays when a change is observed,
//! never how long a phase lasts.
//!
//! ```text
//! Inactive --begin--> Inhale --4s--> Hold --4s--> Exhale --4s--> Inhale ...
//! any --end--> Inactive (phase frozen, schedule cancelled)
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::interval::Interval;
use crate::events::Event;

pub const DEFAULT_DWELL_MS: u64 = 4000;
pub const DEFAULT_PHASE_TICK_MS: u64 = 250;

/// Indicator circle radius bounds, in px.
pub const RADIUS_MIN: f64 = 40.0;
pub const RADIUS_MAX: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    pub fn next(self) -> Self {
        match self {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Inhale,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BreathPhase::Inhale => "inhale",
            BreathPhase::Hold => "hold",
            BreathPhase::Exhale => "exhale",
        }
    }
}

impl std::fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Dwell time per phase in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDwell {
    pub inhale_ms: u64,
    pub hold_ms: u64,
    pub exhale_ms: u64,
}

impl PhaseDwell {
    /// Zero dwells would spin forever, so every phase lasts at least 1ms.
    pub fn for_phase(&self, phase: BreathPhase) -> u64 {
        let ms = match phase {
            BreathPhase::Inhale => self.inhale_ms,
            BreathPhase::Hold => self.hold_ms,
            BreathPhase::Exhale => self.exhale_ms,
        };
        ms.max(1)
    }

    pub fn cycle_ms(&self) -> u64 {
        [BreathPhase::Inhale, BreathPhase::Hold, BreathPhase::Exhale]
            .iter()
            .map(|p| self.for_phase(*p))
            .sum()
    }
}

impl Default for PhaseDwell {
    fn default() -> Self {
        Self {
            inhale_ms: DEFAULT_DWELL_MS,
            hold_ms: DEFAULT_DWELL_MS,
            exhale_ms: DEFAULT_DWELL_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhaseCycle {
    phase: BreathPhase,
    active: bool,
    phase_started_ms: u64,
    dwell: PhaseDwell,
    interval: Interval,
}

impl PhaseCycle {
    pub fn new(dwell: PhaseDwell, tick_ms: u64) -> Self {
        Self {
            phase: BreathPhase::Inhale,
            active: false,
            phase_started_ms: 0,
            dwell,
            interval: Interval::new(tick_ms),
        }
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn dwell(&self) -> PhaseDwell {
        self.dwell
    }

    /// True while a tick is scheduled. Always false after `end()`.
    pub fn has_pending_tick(&self) -> bool {
        self.interval.is_armed()
    }

    pub fn begin(&mut self, now_ms: u64) -> Option<Event> {
        if self.active {
            return None;
        }
        self.active = true;
        self.phase = BreathPhase::Inhale;
        self.phase_started_ms = now_ms;
        self.interval.arm(now_ms);
        debug!("breathing cycle started");
        Some(Event::BreathingStarted { at: Utc::now() })
    }

    /// Cancel the schedule synchronously; the phase stays where it was.
    pub fn end(&mut self) -> Option<Event> {
        if !self.active {
            return None;
        }
        self.active = false;
        self.interval.cancel();
        debug!(phase = %self.phase, "breathing cycle ended");
        Some(Event::BreathingEnded {
            phase: self.phase,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self, now_ms: u64) -> Option<Event> {
        if self.active {
            self.end()
        } else {
            self.begin(now_ms)
        }
    }

    /// Apply every phase change that is due at `now_ms`.
    pub fn advance(&mut self, now_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        if self.interval.take_due(now_ms) == 0 || !self.active {
            return events;
        }
        loop {
            let dwell = self.dwell.for_phase(self.phase);
            let boundary = self.phase_started_ms.saturating_add(dwell);
            if now_ms < boundary {
                break;
            }
            self.phase_started_ms = boundary;
            self.phase = self.phase.next();
            debug!(phase = %self.phase, since_ms = boundary, "breathing phase");
            events.push(Event::PhaseChanged {
                phase: self.phase,
                since_ms: boundary,
                at: Utc::now(),
            });
        }
        events
    }

    /// Fraction of the current phase elapsed; 0.0 while inactive.
    pub fn phase_progress(&self, now_ms: u64) -> f64 {
        if !self.active {
            return 0.0;
        }
        let dwell = self.dwell.for_phase(self.phase);
        let elapsed = now_ms.saturating_sub(self.phase_started_ms);
        (elapsed as f64 / dwell as f64).clamp(0.0, 1.0)
    }

    /// Radius of the breathing indicator: grows on inhale, holds, shrinks on
    /// exhale.
    pub fn indicator_radius(&self, now_ms: u64) -> f64 {
        if !self.active {
            return RADIUS_MIN;
        }
        let p = self.phase_progress(now_ms);
        let span = RADIUS_MAX - RADIUS_MIN;
        match self.phase {
            BreathPhase::Inhale => RADIUS_MIN + span * p,
            BreathPhase::Hold => RADIUS_MAX,
            BreathPhase::Exhale => RADIUS_MAX - span * p,
        }
    }
}

impl Default for PhaseCycle {
    fn default() -> Self {
        Self::new(PhaseDwell::default(), DEFAULT_PHASE_TICK_MS)
    }
}
