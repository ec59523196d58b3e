//! The spawned side of a queue

use super::{QueueEvent, QueueStatus, QueueSummary};
use crate::config::DownloadConfig;
use crate::download::{Download, DownloadEvent, DownloadResult};
use crate::job::JobDescriptor;
use haul_errors::Error;
use haul_events::{AppEvent, EventEmitter, EventSender, QueueLifecycle, QueueProgress};
use haul_net::Transport;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

pub(super) struct Driver {
    pub(super) jobs: Vec<JobDescriptor>,
    pub(super) transport: Arc<dyn Transport>,
    pub(super) config: DownloadConfig,
    pub(super) diagnostics: Option<EventSender>,
    pub(super) events: mpsc::UnboundedSender<QueueEvent>,
    pub(super) status: watch::Sender<QueueStatus>,
    pub(super) cancel: CancellationToken,
}

impl EventEmitter for Driver {
    fn event_sender(&self) -> Option<&EventSender> {
        self.diagnostics.as_ref()
    }
}

impl Driver {
    #[instrument(skip(self), fields(jobs = self.jobs.len()))]
    pub(super) async fn run(self) {
        let total = self.jobs.len();
        let mut summary = QueueSummary::default();
        self.emit(AppEvent::Queue(QueueLifecycle::Started { jobs: total }));

        for (position, job) in self.jobs.iter().enumerate() {
            if self.cancel.is_cancelled() {
                self.end_aborted(position);
                return;
            }

            self.status.send_replace(QueueStatus::Running { position });
            self.emit(AppEvent::Queue(QueueLifecycle::JobDispatched {
                position,
                jobs: total,
                url: job.url.clone(),
            }));

            let mut download =
                Download::new(job.clone(), Arc::clone(&self.transport), self.config.clone());
            if let Some(events) = &self.diagnostics {
                download = download.with_events(events.clone());
            }
            let mut active = download.start();

            let outcome = loop {
                let next = tokio::select! {
                    biased;
                    () = self.cancel.cancelled() => None,
                    event = active.next_event() => Some(event),
                };

                let Some(event) = next else {
                    active.abort();
                    match active.finished().await {
                        // The aborted job is not reported as finished
                        Err(Error::Aborted) => self.end_aborted(position),
                        // It ended before the abort landed: report it like any other job
                        outcome => {
                            self.retire(position, job, outcome, &mut summary);
                            self.end_aborted(position + 1);
                        }
                    }
                    return;
                };

                match event {
                    Some(DownloadEvent::Progress(progress)) => {
                        let _ = self.events.send(QueueEvent::Progress {
                            job: job.clone(),
                            progress: QueueProgress::aggregate(
                                position,
                                total,
                                progress.current.unwrap_or(0.0),
                            ),
                        });
                    }
                    Some(DownloadEvent::End(outcome)) => break outcome,
                    None => break Err(Error::internal("download ended without an outcome")),
                }
            };

            self.retire(position, job, outcome, &mut summary);
        }

        self.status.send_replace(QueueStatus::Ended { position: total });
        self.emit(AppEvent::Queue(QueueLifecycle::Completed {
            completed: summary.completed,
            failed: summary.failed,
        }));
        let _ = self.events.send(QueueEvent::End(Ok(summary)));
    }

    /// Count and relay the terminal outcome of the job at `position`
    fn retire(
        &self,
        position: usize,
        job: &JobDescriptor,
        outcome: Result<DownloadResult, Error>,
        summary: &mut QueueSummary,
    ) {
        if outcome.is_ok() {
            summary.completed += 1;
        } else {
            summary.failed += 1;
        }
        self.emit(AppEvent::Queue(QueueLifecycle::JobFinished {
            position,
            url: job.url.clone(),
            success: outcome.is_ok(),
        }));
        let _ = self.events.send(QueueEvent::JobEnd {
            job: job.clone(),
            outcome,
        });
    }

    fn end_aborted(&self, position: usize) {
        self.status.send_replace(QueueStatus::Ended { position });
        self.emit(AppEvent::Queue(QueueLifecycle::Aborted {
            position,
            jobs: self.jobs.len(),
        }));
        let _ = self.events.send(QueueEvent::End(Err(Error::Aborted)));
    }
}
