#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for haul
//!
//! Every failure a transfer or a queue can end with is represented here,
//! grouped by domain. All error types implement `Clone` so a single terminal
//! outcome can be fanned out to several observers.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod integrity;
pub mod network;
pub mod queue;
pub mod storage;

// Re-export all error types at the root
pub use config::ConfigError;
pub use integrity::IntegrityError;
pub use network::NetworkError;
pub use queue::QueueError;
pub use storage::StorageError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("aborted")]
    Aborted,

    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse classification of an [`Error`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Connection or stream failure reported by the transport
    Transport,
    /// Disk I/O failure while writing the destination
    Write,
    /// Bytes on disk differ from the declared content length
    IntegritySizeMismatch,
    /// Digest of the file differs from the expected hash
    IntegrityHashMismatch,
    /// Explicit cancellation by the caller
    Aborted,
    /// API misuse, such as starting a queue twice
    Usage,
    Config,
    Internal,
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Transport,
            Self::Storage(_) => ErrorKind::Write,
            Self::Integrity(IntegrityError::SizeMismatch { .. }) => {
                ErrorKind::IntegritySizeMismatch
            }
            Self::Integrity(IntegrityError::HashMismatch { .. }) => {
                ErrorKind::IntegrityHashMismatch
            }
            Self::Aborted => ErrorKind::Aborted,
            Self::Queue(_) => ErrorKind::Usage,
            Self::Config(_) => ErrorKind::Config,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether this error is the result of an explicit abort
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

/// Result type alias for haul operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    ///
    /// Advisory only: nothing in haul retries on its own.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for analytics / structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Network(err) => err.user_message(),
            Error::Storage(err) => err.user_message(),
            Error::Integrity(err) => err.user_message(),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Network(err) => err.user_hint(),
            Error::Storage(err) => err.user_hint(),
            Error::Integrity(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
            Error::Queue(err) => err.user_hint(),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Error::Network(err) => err.is_retryable(),
            Error::Storage(err) => err.is_retryable(),
            Error::Integrity(err) => err.is_retryable(),
            _ => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Network(err) => err.user_code(),
            Error::Storage(err) => err.user_code(),
            Error::Integrity(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Queue(err) => err.user_code(),
            Error::Aborted => Some("error.aborted"),
            Error::Internal(_) => Some("error.internal"),
        }
    }
}
