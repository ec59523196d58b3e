//! Minimum spacing between published progress samples

use std::time::{Duration, Instant};

/// Gate that opens at most once per interval.
///
/// The first check always passes. A zero interval never holds a sample back.
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    interval: Duration,
    opened_at: Option<Instant>,
}

impl ProgressThrottle {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            opened_at: None,
        }
    }

    /// Whether a sample taken at `now` may be published
    ///
    /// A passing check restarts the interval from `now`.
    pub fn should_emit_at(&mut self, now: Instant) -> bool {
        let held = self
            .opened_at
            .is_some_and(|at| now.saturating_duration_since(at) < self.interval);
        if !held {
            self.opened_at = Some(now);
        }
        !held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_passes() {
        let mut throttle = ProgressThrottle::new(Duration::from_secs(60));
        assert!(throttle.should_emit_at(Instant::now()));
    }

    #[test]
    fn test_holds_until_interval_elapsed() {
        let mut throttle = ProgressThrottle::new(Duration::from_millis(500));
        let start = Instant::now();
        assert!(throttle.should_emit_at(start));
        assert!(!throttle.should_emit_at(start + Duration::from_millis(499)));
        assert!(throttle.should_emit_at(start + Duration::from_millis(500)));
        // the interval restarts at the last passing sample
        assert!(!throttle.should_emit_at(start + Duration::from_millis(900)));
    }

    #[test]
    fn test_zero_interval_never_holds() {
        let mut throttle = ProgressThrottle::new(Duration::ZERO);
        let now = Instant::now();
        assert!(throttle.should_emit_at(now));
        assert!(throttle.should_emit_at(now));
    }
}
