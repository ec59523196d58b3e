//! The spawned side of a download

use super::progress::ProgressTracker;
use super::{DownloadEvent, DownloadResult, TransferStatus};
use crate::config::DownloadConfig;
use crate::job::JobDescriptor;
use futures::StreamExt;
use haul_errors::{Error, StorageError, UserFacingError};
use haul_events::{AppEvent, EventEmitter, EventSender, TransferLifecycle, TransferProgress};
use haul_hash::{normalize_hex, IntegrityChecker};
use haul_net::{parse_url, validate_status, BodyStream, Transport};
use std::sync::Arc;
use std::time::Instant;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Everything a transfer needs once it leaves the caller's task
pub(super) struct Transfer {
    pub(super) job: JobDescriptor,
    pub(super) transport: Arc<dyn Transport>,
    pub(super) config: DownloadConfig,
    pub(super) diagnostics: Option<EventSender>,
    pub(super) progress: mpsc::UnboundedSender<DownloadEvent>,
    pub(super) status: watch::Sender<TransferStatus>,
    pub(super) cancel: CancellationToken,
}

/// Resources held while the body is streaming
///
/// Dropping the handle closes the destination and cancels the request.
struct TransferHandle {
    body: BodyStream,
    sink: File,
    tracker: ProgressTracker,
}

impl EventEmitter for Transfer {
    fn event_sender(&self) -> Option<&EventSender> {
        self.diagnostics.as_ref()
    }
}

impl Transfer {
    /// Drive the transfer to its terminal event
    #[instrument(skip(self), fields(url = %self.job.url, file = %self.job.file.display()))]
    pub(super) async fn run(self) {
        let started = Instant::now();

        let outcome = match self.execute(started).await {
            Ok(result) => Ok(result),
            Err(err) => {
                self.cleanup().await;
                // Once abort was requested, whatever interrupted the transfer is reported as the abort
                if self.cancel.is_cancelled() {
                    Err(Error::Aborted)
                } else {
                    Err(err)
                }
            }
        };

        let status = match &outcome {
            Ok(result) => {
                self.emit(AppEvent::Transfer(TransferLifecycle::Completed {
                    url: self.job.url.clone(),
                    file: self.job.file.clone(),
                    size: result.size,
                    elapsed: result.elapsed,
                }));
                TransferStatus::Completed
            }
            Err(Error::Aborted) => {
                self.emit(AppEvent::Transfer(TransferLifecycle::Aborted {
                    url: self.job.url.clone(),
                    file: self.job.file.clone(),
                }));
                TransferStatus::Aborted
            }
            Err(err) => {
                self.emit(AppEvent::Transfer(TransferLifecycle::Failed {
                    url: self.job.url.clone(),
                    file: self.job.file.clone(),
                    error: err.to_string(),
                    code: err.user_code().map(str::to_string),
                }));
                TransferStatus::Failed
            }
        };

        self.status.send_replace(status);
        let _ = self.progress.send(DownloadEvent::End(outcome));
    }

    async fn execute(&self, started: Instant) -> Result<DownloadResult, Error> {
        let url = parse_url(&self.job.url)?;

        self.status.send_replace(TransferStatus::Connecting);
        let response = tokio::select! {
            biased;
            () = self.cancel.cancelled() => return Err(Error::Aborted),
            response = self.transport.fetch(&url) => response?,
        };

        if self.config.require_success_status {
            validate_status(response.status)?;
        } else if let Err(status) = validate_status(response.status) {
            self.emit_warning_with_context(
                format!("accepting error response: {status}"),
                self.job.url.clone(),
            );
        }

        let expected = response.content_length.unwrap_or(0);
        let sink = File::create(&self.job.file)
            .await
            .map_err(|e| StorageError::create(&e, &self.job.file))?;

        self.status.send_replace(TransferStatus::Transferring);
        self.emit(AppEvent::Transfer(TransferLifecycle::Started {
            url: self.job.url.clone(),
            file: self.job.file.clone(),
            total_size: response.content_length,
        }));

        let handle = TransferHandle {
            body: response.body,
            sink,
            tracker: ProgressTracker::new(
                self.config.progress_interval,
                self.config.speed_window,
                expected,
                Instant::now(),
            ),
        };
        let size = self.stream(handle).await?;

        self.status.send_replace(TransferStatus::Verifying);
        let checker = IntegrityChecker::new(self.config.hash_algorithm);
        self.emit(AppEvent::Transfer(TransferLifecycle::Verifying {
            url: self.job.url.clone(),
            algorithm: self
                .job
                .hash
                .as_ref()
                .map(|_| checker.algorithm().to_string()),
        }));

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => return Err(Error::Aborted),
            verified = checker.verify(&self.job.file, expected, self.job.hash.as_deref()) => verified?,
        }

        Ok(DownloadResult {
            url: self.job.url.clone(),
            file: self.job.file.clone(),
            size,
            hash: self.job.hash.as_deref().map(normalize_hex),
            elapsed: started.elapsed(),
        })
    }

    /// Copy the body to disk, returning the number of bytes written
    async fn stream(&self, mut handle: TransferHandle) -> Result<u64, Error> {
        loop {
            let next = tokio::select! {
                biased;
                () = self.cancel.cancelled() => return Err(Error::Aborted),
                next = handle.body.next() => next,
            };
            let Some(chunk) = next else { break };
            let chunk = chunk?;

            handle
                .sink
                .write_all(&chunk)
                .await
                .map_err(|e| StorageError::write(&e, &self.job.file))?;

            if let Some(progress) = handle.tracker.advance(chunk.len() as u64) {
                self.publish(progress);
            }
        }

        handle
            .sink
            .flush()
            .await
            .map_err(|e| StorageError::flush(&e, &self.job.file))?;

        if let Some(progress) = handle.tracker.finish() {
            self.publish(progress);
        }

        Ok(handle.tracker.transferred())
    }

    fn publish(&self, progress: TransferProgress) {
        let _ = self.progress.send(DownloadEvent::Progress(progress));
    }

    /// Remove whatever was written to the destination
    async fn cleanup(&self) {
        match tokio::fs::remove_file(&self.job.file).await {
            Ok(()) => self.emit_debug(format!(
                "removed incomplete download {}",
                self.job.file.display()
            )),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => self.emit(AppEvent::Transfer(TransferLifecycle::CleanupFailed {
                file: self.job.file.clone(),
                error: e.to_string(),
            })),
        }
    }
}
