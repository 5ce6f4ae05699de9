//! Repeating schedule owned by an engine.
//!
//! An `Interval` is the only way an engine gets time-driven work done. The
//! host hands it the current time and it reports how many whole periods have
//! elapsed since the last report. Cancelling drops the next due time, so a
//! cancelled schedule cannot fire again until it is explicitly re-armed.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    period_ms: u64,
    next_due_ms: Option<u64>,
}

impl Interval {
    /// Periods below one millisecond are clamped to one.
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            next_due_ms: None,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn is_armed(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.next_due_ms
    }

    /// Schedule the first tick one period after `now_ms`.
    pub fn arm(&mut self, now_ms: u64) {
        self.next_due_ms = Some(now_ms.saturating_add(self.period_ms));
    }

    pub fn cancel(&mut self) {
        self.next_due_ms = None;
    }

    /// Number of ticks due at `now_ms`, consuming them.
    ///
    /// A reading earlier than the last one yields zero.
    pub fn take_due(&mut self, now_ms: u64) -> u64 {
        let Some(next) = self.next_due_ms else {
            return 0;
        };
        if now_ms < next {
            return 0;
        }
        let due = (now_ms - next) / self.period_ms + 1;
        self.next_due_ms = Some(next.saturating_add(due.saturating_mul(self.period_ms)));
        due
    }
}
