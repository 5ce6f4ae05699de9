mod countdown;
mod interval;
mod phase;

pub use countdown::{
    format_mm_ss, CountdownState, CountdownTimer, COUNTDOWN_TICK_MS, DEFAULT_DURATION_SECS,
};
pub use interval::Interval;
pub use phase::{
    BreathPhase, PhaseCycle, PhaseDwell, DEFAULT_DWELL_MS, DEFAULT_PHASE_TICK_MS, RADIUS_MAX,
    RADIUS_MIN,
};
