use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::BreathPhase;
use crate::workspace::Theme;

/// Every state change in the workspace produces an Event.
/// The host renders from them; the workspace persists on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CountdownStarted {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownReset {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero and reset itself to its configured duration.
    CountdownCompleted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    SessionsUpdated {
        count: u64,
        at: DateTime<Utc>,
    },
    BreathingStarted {
        at: DateTime<Utc>,
    },
    /// A breathing phase began at `since_ms` on the engine clock.
    PhaseChanged {
        phase: BreathPhase,
        since_ms: u64,
        at: DateTime<Utc>,
    },
    BreathingEnded {
        phase: BreathPhase,
        at: DateTime<Utc>,
    },
    ThemeChanged {
        theme: Theme,
        at: DateTime<Utc>,
    },
    FocusChanged {
        text: String,
        at: DateTime<Utc>,
    },
    QuoteRotated {
        content: String,
        author: String,
        at: DateTime<Utc>,
    },
    ClockTick {
        greeting: String,
        time: String,
        at: DateTime<Utc>,
    },
}
