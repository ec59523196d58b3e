//! Sequential queue of downloads
//!
//! A [`Queue`] collects jobs, then [`Queue::start`] spawns a driver that
//! runs them one at a time in insertion order. The returned [`QueueEvents`]
//! yields per-job progress and outcomes followed by exactly one
//! [`QueueEvent::End`]. A failed job is reported and the queue moves on; only
//! exhausting the jobs or aborting ends it.
//!
//! A queue is single-use: it cannot be restarted or extended once started.

mod driver;

use crate::config::DownloadConfig;
use crate::download::DownloadResult;
use crate::job::JobDescriptor;
use haul_errors::{Error, QueueError};
use haul_events::{EventSender, QueueProgress};
use haul_net::Transport;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use driver::Driver;

/// Where the queue is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QueueStatus {
    Idle,
    /// Job at `position` is being downloaded
    Running { position: usize },
    /// No more jobs will run; `position` equals the job count after a full run
    Ended { position: usize },
}

/// Counts of a queue that ran to the end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueSummary {
    pub completed: usize,
    pub failed: usize,
}

/// Event stream item of a running queue
#[derive(Debug, Clone)]
pub enum QueueEvent {
    Progress {
        job: JobDescriptor,
        progress: QueueProgress,
    },
    /// A job reached its terminal outcome, successful or not
    JobEnd {
        job: JobDescriptor,
        outcome: Result<DownloadResult, Error>,
    },
    /// Terminal event, delivered exactly once
    End(Result<QueueSummary, Error>),
}

pub struct Queue {
    jobs: Vec<JobDescriptor>,
    transport: Arc<dyn Transport>,
    config: DownloadConfig,
    events: Option<EventSender>,
    status_tx: Option<watch::Sender<QueueStatus>>,
    status: watch::Receiver<QueueStatus>,
    cancel: CancellationToken,
}

impl Queue {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, config: DownloadConfig) -> Self {
        let (status_tx, status) = watch::channel(QueueStatus::Idle);
        Self {
            jobs: Vec::new(),
            transport,
            config,
            events: None,
            status_tx: Some(status_tx),
            status,
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn from_jobs(
        transport: Arc<dyn Transport>,
        config: DownloadConfig,
        jobs: impl IntoIterator<Item = JobDescriptor>,
    ) -> Self {
        let mut queue = Self::new(transport, config);
        queue.jobs.extend(jobs);
        queue
    }

    /// Attach the diagnostic channel, shared with every download the queue runs
    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Append a job
    ///
    /// # Errors
    ///
    /// Returns `QueueError::AlreadyStarted` once the queue was started.
    pub fn add(&mut self, job: JobDescriptor) -> Result<(), Error> {
        if self.status_tx.is_none() {
            return Err(QueueError::AlreadyStarted.into());
        }
        self.jobs.push(job);
        Ok(())
    }

    #[must_use]
    pub fn jobs(&self) -> &[JobDescriptor] {
        &self.jobs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    #[must_use]
    pub fn status(&self) -> QueueStatus {
        *self.status.borrow()
    }

    /// Index of the active (or last) job, `None` before start
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self.status() {
            QueueStatus::Idle => None,
            QueueStatus::Running { position } | QueueStatus::Ended { position } => Some(position),
        }
    }

    /// Begin processing jobs in order
    ///
    /// # Errors
    ///
    /// Returns `QueueError::AlreadyStarted` while running and
    /// `QueueError::AlreadyEnded` after the queue finished.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn start(&mut self) -> Result<QueueEvents, Error> {
        let Some(status_tx) = self.status_tx.take() else {
            return Err(match self.status() {
                QueueStatus::Ended { .. } => QueueError::AlreadyEnded.into(),
                _ => QueueError::AlreadyStarted.into(),
            });
        };

        status_tx.send_replace(QueueStatus::Running { position: 0 });
        let (tx, rx) = mpsc::unbounded_channel();

        let driver = Driver {
            jobs: self.jobs.clone(),
            transport: Arc::clone(&self.transport),
            config: self.config.clone(),
            diagnostics: self.events.clone(),
            events: tx,
            status: status_tx,
            cancel: self.cancel.clone(),
        };
        tokio::spawn(driver.run());

        Ok(QueueEvents {
            events: rx,
            status: self.status.clone(),
            cancel: self.cancel.clone(),
            ended: false,
        })
    }

    /// Abort the active job and stop the queue
    ///
    /// Does nothing before start or after the queue ended. Otherwise returns
    /// once the active job was cleaned up; the event stream then ends with
    /// `End(Err(Error::Aborted))`.
    pub async fn abort(&self) {
        if !matches!(self.status(), QueueStatus::Running { .. }) {
            return;
        }
        self.cancel.cancel();

        let mut status = self.status.clone();
        if status
            .wait_for(|s| matches!(s, QueueStatus::Ended { .. }))
            .await
            .is_err()
        {
            debug!("queue driver stopped before publishing its end state");
        }
    }
}

impl std::fmt::Debug for Queue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Queue")
            .field("jobs", &self.jobs)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

/// Event stream of a started queue
///
/// Dropping it before the terminal event aborts the queue.
pub struct QueueEvents {
    events: mpsc::UnboundedReceiver<QueueEvent>,
    status: watch::Receiver<QueueStatus>,
    cancel: CancellationToken,
    ended: bool,
}

impl QueueEvents {
    /// Request an abort without waiting for it
    pub fn abort(&self) {
        if matches!(*self.status.borrow(), QueueStatus::Running { .. }) {
            self.cancel.cancel();
        }
    }

    #[must_use]
    pub fn status(&self) -> QueueStatus {
        *self.status.borrow()
    }

    /// Next queue event, `None` once the terminal event was taken
    pub async fn next_event(&mut self) -> Option<QueueEvent> {
        if self.ended {
            return None;
        }

        loop {
            match self.events.recv().await {
                Some(QueueEvent::Progress { .. }) if self.cancel.is_cancelled() => {}
                Some(end @ QueueEvent::End(_)) => {
                    self.ended = true;
                    return Some(end);
                }
                Some(event) => return Some(event),
                None => {
                    self.ended = true;
                    return Some(QueueEvent::End(Err(Error::internal(
                        "queue driver stopped without a terminal event",
                    ))));
                }
            }
        }
    }

    /// Drain the stream and return the queue's terminal outcome
    ///
    /// # Errors
    ///
    /// Returns `Error::Aborted` when the queue was aborted.
    pub async fn finished(mut self) -> Result<QueueSummary, Error> {
        while let Some(event) = self.next_event().await {
            if let QueueEvent::End(outcome) = event {
                return outcome;
            }
        }
        Err(Error::internal("queue already finished"))
    }
}

impl Drop for QueueEvents {
    fn drop(&mut self) {
        if !self.ended {
            self.cancel.cancel();
        }
    }
}

impl std::fmt::Debug for QueueEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueEvents")
            .field("status", &self.status())
            .field("ended", &self.ended)
            .finish_non_exhaustive()
    }
}
