use chrono::Utc;
use rand::Rng;

use super::{pick, Quote, ROTATING_QUOTES};
use crate::events::Event;
use crate::timer::Interval;

/// Header quote, replaced by a random built-in quote every period while
/// started.
#[derive(Debug, Clone)]
pub struct QuoteRotation {
    current: Quote,
    interval: Interval,
}

impl QuoteRotation {
    pub fn new<R: Rng + ?Sized>(period_ms: u64, rng: &mut R) -> Self {
        Self {
            current: pick(&ROTATING_QUOTES, rng),
            interval: Interval::new(period_ms),
        }
    }

    pub fn current(&self) -> &Quote {
        &self.current
    }

    pub fn start(&mut self, now_ms: u64) {
        self.interval.arm(now_ms);
    }

    pub fn stop(&mut self) {
        self.interval.cancel();
    }

    /// Pick a new quote if a rotation is due. Several missed periods still
    /// rotate once.
    pub fn advance<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> Option<Event> {
        if self.interval.take_due(now_ms) == 0 {
            return None;
        }
        self.current = pick(&ROTATING_QUOTES, rng);
        Some(Event::QuoteRotated {
            content: self.current.content.clone(),
            author: self.current.author.clone(),
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rotates_on_period() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut rotation = QuoteRotation::new(120_000, &mut rng);
        rotation.start(0);
        assert!(rotation.advance(119_999, &mut rng).is_none());
        assert!(rotation.advance(120_000, &mut rng).is_some());
        assert!(rotation.advance(600_000, &mut rng).is_some());
        assert!(rotation.advance(600_001, &mut rng).is_none());
    }

    #[test]
    fn stopped_rotation_holds_quote() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut rotation = QuoteRotation::new(1000, &mut rng);
        let before = rotation.current().clone();
        rotation.start(0);
        rotation.stop();
        assert!(rotation.advance(10_000, &mut rng).is_none());
        assert_eq!(rotation.current(), &before);
    }
}
