use serde::{Deserialize, Serialize};

/// Lifecycle notices for a download queue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QueueLifecycle {
    /// Queue began processing
    Started { jobs: usize },

    /// A job was handed to a fresh download
    JobDispatched {
        position: usize,
        jobs: usize,
        url: String,
    },

    /// A job reached its terminal outcome
    JobFinished {
        position: usize,
        url: String,
        success: bool,
    },

    /// Every job was processed
    Completed { completed: usize, failed: usize },

    /// Queue stopped by `abort()`
    Aborted { position: usize, jobs: usize },
}
