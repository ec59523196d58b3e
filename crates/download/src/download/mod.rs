//! Single transfer: network stream to disk, verified, cleaned up on failure
//!
//! A [`Download`] is configured, then consumed by [`Download::start`], which
//! spawns the transfer and hands back an [`ActiveDownload`]. The handle is
//! the only way to observe the transfer: it yields zero or more
//! [`DownloadEvent::Progress`] followed by exactly one [`DownloadEvent::End`],
//! after which it yields `None`.

mod progress;
mod transfer;

use crate::config::DownloadConfig;
use crate::job::JobDescriptor;
use haul_errors::Error;
use haul_events::{EventSender, TransferProgress};
use haul_net::Transport;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use transfer::Transfer;

/// Lifecycle of a single transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Idle,
    /// Request sent, waiting for response headers
    Connecting,
    /// Streaming the body to disk
    Transferring,
    /// Body written, checking size and hash
    Verifying,
    Completed,
    Failed,
    Aborted,
}

impl TransferStatus {
    /// Whether the transfer has reached its final state
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Aborted)
    }
}

/// Outcome of a successful transfer
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadResult {
    pub url: String,
    pub file: PathBuf,
    /// Bytes written to `file`
    pub size: u64,
    /// Verified digest, when the job carried one
    pub hash: Option<String>,
    pub elapsed: Duration,
}

/// Event stream item of an [`ActiveDownload`]
#[derive(Debug, Clone)]
pub enum DownloadEvent {
    Progress(TransferProgress),
    /// Terminal event, delivered exactly once
    End(Result<DownloadResult, Error>),
}

/// A transfer that has not been started yet
pub struct Download {
    job: JobDescriptor,
    transport: Arc<dyn Transport>,
    config: DownloadConfig,
    events: Option<EventSender>,
}

impl Download {
    #[must_use]
    pub fn new(job: JobDescriptor, transport: Arc<dyn Transport>, config: DownloadConfig) -> Self {
        Self {
            job,
            transport,
            config,
            events: None,
        }
    }

    /// Attach the diagnostic channel (lifecycle notices, cleanup failures)
    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    #[must_use]
    pub fn descriptor(&self) -> &JobDescriptor {
        &self.job
    }

    /// Begin the transfer
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[must_use = "dropping the handle aborts the transfer"]
    pub fn start(self) -> ActiveDownload {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(TransferStatus::Idle);
        let cancel = CancellationToken::new();

        let transfer = Transfer {
            job: self.job.clone(),
            transport: self.transport,
            config: self.config,
            diagnostics: self.events,
            progress: event_tx,
            status: status_tx,
            cancel: cancel.clone(),
        };
        tokio::spawn(transfer.run());

        ActiveDownload {
            job: self.job,
            events: event_rx,
            status: status_rx,
            cancel,
            ended: false,
        }
    }
}

/// Handle to a running transfer
///
/// Dropping the handle before the terminal event aborts the transfer.
pub struct ActiveDownload {
    job: JobDescriptor,
    events: mpsc::UnboundedReceiver<DownloadEvent>,
    status: watch::Receiver<TransferStatus>,
    cancel: CancellationToken,
    ended: bool,
}

impl ActiveDownload {
    /// Request cancellation
    ///
    /// Safe to call any number of times and in any state. Once called, no
    /// further progress is observed and the terminal event is
    /// `End(Err(Error::Aborted))`, unless the transfer had already finished.
    pub fn abort(&self) {
        self.cancel.cancel();
    }

    /// Token that aborts this transfer when cancelled
    #[must_use]
    pub fn abort_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    #[must_use]
    pub fn status(&self) -> TransferStatus {
        *self.status.borrow()
    }

    #[must_use]
    pub fn descriptor(&self) -> &JobDescriptor {
        &self.job
    }

    /// Next event of the transfer, `None` once the terminal event was taken
    pub async fn next_event(&mut self) -> Option<DownloadEvent> {
        if self.ended {
            return None;
        }

        loop {
            match self.events.recv().await {
                Some(DownloadEvent::Progress(_)) if self.cancel.is_cancelled() => {}
                Some(progress @ DownloadEvent::Progress(_)) => return Some(progress),
                Some(end @ DownloadEvent::End(_)) => {
                    self.ended = true;
                    return Some(end);
                }
                None => {
                    // The task went away without reporting, which only a panic can cause
                    self.ended = true;
                    return Some(DownloadEvent::End(Err(Error::internal(
                        "download task stopped without a terminal event",
                    ))));
                }
            }
        }
    }

    /// Drain the event stream and return the terminal outcome
    ///
    /// # Errors
    ///
    /// Returns the transfer's terminal error.
    pub async fn finished(mut self) -> Result<DownloadResult, Error> {
        while let Some(event) = self.next_event().await {
            if let DownloadEvent::End(outcome) = event {
                return outcome;
            }
        }
        Err(Error::internal("download already finished"))
    }
}

impl Drop for ActiveDownload {
    fn drop(&mut self) {
        if !self.ended {
            self.cancel.cancel();
        }
    }
}

impl std::fmt::Debug for ActiveDownload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveDownload")
            .field("job", &self.job)
            .field("status", &self.status())
            .field("ended", &self.ended)
            .finish_non_exhaustive()
    }
}
