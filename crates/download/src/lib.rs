#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Verified file downloads for haul
//!
//! Two cooperating state machines:
//!
//! - [`Download`] streams one URL to one file, reports throttled progress,
//!   verifies size and hash, and removes the file on any failure.
//! - [`Queue`] runs many downloads strictly one after another, aggregates
//!   their progress and relays each job's outcome.
//!
//! Both report through an event stream that carries zero or more progress
//! events followed by exactly one terminal event. Nothing is retried: a
//! failed job is reported and the caller decides what to do with it.

mod config;
mod download;
mod job;
mod queue;

pub use config::DownloadConfig;
pub use download::{ActiveDownload, Download, DownloadEvent, DownloadResult, TransferStatus};
pub use job::JobDescriptor;
pub use queue::{Queue, QueueEvent, QueueEvents, QueueStatus, QueueSummary};

pub use haul_events::{QueueProgress, TransferProgress};

use haul_errors::Error;
use haul_net::Transport;
use std::sync::Arc;

/// Download a single job and wait for its terminal outcome
///
/// # Errors
///
/// Returns the transfer's terminal error: transport, write or integrity
/// failure.
pub async fn download_file(
    transport: Arc<dyn Transport>,
    job: JobDescriptor,
    config: DownloadConfig,
) -> Result<DownloadResult, Error> {
    Download::new(job, transport, config).start().finished().await
}
