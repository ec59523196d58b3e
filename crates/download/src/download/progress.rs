//! Byte accounting for a running transfer

use haul_events::{ProgressThrottle, SpeedWindow, TransferProgress};
use std::time::{Duration, Instant};

/// Counts written bytes and decides when a progress sample is published
///
/// Samples are throttled to one per interval and never repeat a byte count,
/// so consumers see strictly increasing `bytes_transferred`.
#[derive(Debug)]
pub(super) struct ProgressTracker {
    throttle: ProgressThrottle,
    speed: SpeedWindow,
    expected: u64,
    transferred: u64,
    reported: u64,
}

impl ProgressTracker {
    pub(super) fn new(interval: Duration, window: usize, expected: u64, start: Instant) -> Self {
        Self {
            throttle: ProgressThrottle::new(interval),
            speed: SpeedWindow::starting_at(window, start),
            expected,
            transferred: 0,
            reported: 0,
        }
    }

    pub(super) fn transferred(&self) -> u64 {
        self.transferred
    }

    /// Account for `bytes` more written, returning a sample if one is due
    pub(super) fn advance(&mut self, bytes: u64) -> Option<TransferProgress> {
        self.advance_at(bytes, Instant::now())
    }

    fn advance_at(&mut self, bytes: u64, now: Instant) -> Option<TransferProgress> {
        self.transferred = self.transferred.saturating_add(bytes);
        if self.transferred <= self.reported || !self.throttle.should_emit_at(now) {
            return None;
        }
        Some(self.sample(now))
    }

    /// Final sample after the body ended, unless the last one already covered it
    pub(super) fn finish(&mut self) -> Option<TransferProgress> {
        self.finish_at(Instant::now())
    }

    fn finish_at(&mut self, now: Instant) -> Option<TransferProgress> {
        (self.transferred > self.reported).then(|| self.sample(now))
    }

    fn sample(&mut self, now: Instant) -> TransferProgress {
        self.speed.record(now, self.transferred);
        self.reported = self.transferred;
        TransferProgress::new(self.transferred, self.expected, self.speed.bytes_per_sec())
    }
}
