use serde::{Deserialize, Serialize};

pub mod general;
pub mod queue;
pub mod transfer;

pub use general::*;
pub use queue::*;
pub use transfer::*;

/// Top-level diagnostic event that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// Free-form warnings and debug output
    General(GeneralEvent),

    /// Single transfer lifecycle notices
    Transfer(TransferLifecycle),

    /// Queue lifecycle notices
    Queue(QueueLifecycle),
}

impl AppEvent {
    /// Short domain label used as a structured logging field
    #[must_use]
    pub fn domain(&self) -> &'static str {
        match self {
            Self::General(_) => "general",
            Self::Transfer(_) => "transfer",
            Self::Queue(_) => "queue",
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::Transfer(TransferLifecycle::Failed { .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. })
            | Self::Transfer(
                TransferLifecycle::CleanupFailed { .. } | TransferLifecycle::Aborted { .. },
            )
            | Self::Queue(QueueLifecycle::Aborted { .. }) => Level::WARN,

            Self::General(GeneralEvent::DebugLog { .. })
            | Self::Queue(QueueLifecycle::JobDispatched { .. }) => Level::DEBUG,

            _ => Level::INFO,
        }
    }

    /// Write this event to the active `tracing` subscriber
    pub fn trace(&self) {
        use tracing::Level;

        let domain = self.domain();
        match self.log_level() {
            Level::ERROR => tracing::error!(target: "haul::events", domain, event = ?self),
            Level::WARN => tracing::warn!(target: "haul::events", domain, event = ?self),
            Level::INFO => tracing::info!(target: "haul::events", domain, event = ?self),
            Level::DEBUG => tracing::debug!(target: "haul::events", domain, event = ?self),
            Level::TRACE => tracing::trace!(target: "haul::events", domain, event = ?self),
        }
    }
}
