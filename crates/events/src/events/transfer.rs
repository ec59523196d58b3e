use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Lifecycle notices for a single transfer
///
/// These mirror the terminal outcome delivered on the download's own event
/// stream; they exist for logging and monitoring, not for control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransferLifecycle {
    /// Response headers received and destination opened
    Started {
        url: String,
        file: PathBuf,
        total_size: Option<u64>,
    },

    /// Body fully written, verification running
    Verifying {
        url: String,
        algorithm: Option<String>,
    },

    /// File written and verified
    Completed {
        url: String,
        file: PathBuf,
        size: u64,
        elapsed: Duration,
    },

    /// Transfer ended with an error
    Failed {
        url: String,
        file: PathBuf,
        error: String,
        code: Option<String>,
    },

    /// Transfer aborted by the caller
    Aborted { url: String, file: PathBuf },

    /// Destination could not be removed after a failure
    CleanupFailed { file: PathBuf, error: String },
}
