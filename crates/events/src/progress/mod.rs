#![allow(
    clippy::cast_precision_loss,      // Byte counts to ratios and rates
    clippy::must_use_candidate
)]

//! Progress sampling for transfers and queues
//!
//! - [`ProgressThrottle`] rate-limits how often samples are published
//! - [`SpeedWindow`] turns cumulative byte counts into a windowed rate
//! - [`TransferProgress`] and [`QueueProgress`] are the published payloads

mod speed;
mod throttle;

pub use speed::SpeedWindow;
pub use throttle::ProgressThrottle;

use serde::{Deserialize, Serialize};

/// Progress of a single transfer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransferProgress {
    /// Completed fraction in `[0, 1]`, `None` when the length is unknown
    pub current: Option<f64>,
    /// Windowed transfer rate in bytes per second
    pub speed: f64,
    pub bytes_transferred: u64,
    /// Declared content length, `0` when unknown
    pub bytes_expected: u64,
}

impl TransferProgress {
    /// Build a sample, deriving the clamped ratio from the byte counts
    pub fn new(bytes_transferred: u64, bytes_expected: u64, speed: f64) -> Self {
        let current = (bytes_expected > 0)
            .then(|| (bytes_transferred as f64 / bytes_expected as f64).clamp(0.0, 1.0));
        Self {
            current,
            speed,
            bytes_transferred,
            bytes_expected,
        }
    }

    /// Percentage in `[0, 100]` when the length is known
    pub fn percentage(&self) -> Option<f64> {
        self.current.map(|c| c * 100.0)
    }
}

/// Progress of a queue: the active job and the queue as a whole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueProgress {
    /// Fraction of the active job, `0` when its length is unknown
    pub job: f64,
    /// `(position + job) / jobs`
    pub total: f64,
}

impl QueueProgress {
    /// Aggregate a job's fraction into queue-wide progress
    pub fn aggregate(position: usize, jobs: usize, job: f64) -> Self {
        let job = job.clamp(0.0, 1.0);
        let total = if jobs == 0 {
            1.0
        } else {
            ((position as f64 + job) / jobs as f64).clamp(0.0, 1.0)
        };
        Self { job, total }
    }
}
