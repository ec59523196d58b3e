//! Windowed transfer rate over cumulative byte counts

use std::collections::VecDeque;
use std::time::Instant;

/// Ring buffer of `(timestamp, cumulative bytes)` samples.
///
/// The rate is measured between the oldest and newest sample in the window,
/// which smooths out bursty chunk arrival without lagging far behind real
/// changes in throughput.
#[derive(Debug, Clone)]
pub struct SpeedWindow {
    samples: VecDeque<(Instant, u64)>,
    capacity: usize,
}

impl SpeedWindow {
    /// Create a window holding at most `capacity` samples (minimum 2)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a window with a baseline sample at `start`
    pub fn starting_at(capacity: usize, start: Instant) -> Self {
        let mut window = Self::new(capacity);
        window.record(start, 0);
        window
    }

    /// Record the cumulative byte count observed at `at`
    pub fn record(&mut self, at: Instant, total_bytes: u64) {
        if let Some(&(last_at, _)) = self.samples.back() {
            // Clock went backwards or duplicate timestamp: replace the newest sample
            if at <= last_at {
                self.samples.pop_back();
            }
        }
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back((at, total_bytes));
    }

    /// Bytes per second across the window, `0.0` until two samples exist
    pub fn bytes_per_sec(&self) -> f64 {
        let (Some(&(first_at, first)), Some(&(last_at, last))) =
            (self.samples.front(), self.samples.back())
        else {
            return 0.0;
        };

        let elapsed = last_at.saturating_duration_since(first_at).as_secs_f64();
        if elapsed <= f64::EPSILON {
            return 0.0;
        }

        last.saturating_sub(first) as f64 / elapsed
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
