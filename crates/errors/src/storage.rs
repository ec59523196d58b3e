//! Storage and filesystem-related error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("cannot create {path}: {message}")]
    CreateFailed { path: String, message: String },

    #[error("write to {path} failed: {message}")]
    WriteFailed { path: String, message: String },

    #[error("flush of {path} failed: {message}")]
    FlushFailed { path: String, message: String },

    #[error("disk full: {path}")]
    DiskFull { path: String },

    #[error("permission denied: {path}")]
    PermissionDenied { path: String },
}

impl StorageError {
    /// Convert an `io::Error` raised while creating a destination file
    #[must_use]
    pub fn create(err: &std::io::Error, path: &std::path::Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => Self::CreateFailed {
                path: path.display().to_string(),
                message: err.to_string(),
            },
        }
    }

    /// Convert an `io::Error` raised while writing to a destination file
    #[must_use]
    pub fn write(err: &std::io::Error, path: &std::path::Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::StorageFull => Self::DiskFull {
                path: path.display().to_string(),
            },
            _ => Self::WriteFailed {
                path: path.display().to_string(),
                message: err.to_string(),
            },
        }
    }

    /// Convert an `io::Error` raised while flushing a destination file
    #[must_use]
    pub fn flush(err: &std::io::Error, path: &std::path::Path) -> Self {
        Self::FlushFailed {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl UserFacingError for StorageError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::DiskFull { .. } => Some("Free up disk space and retry."),
            Self::PermissionDenied { .. } => {
                Some("Adjust filesystem permissions on the destination directory.")
            }
            Self::CreateFailed { .. } => Some("Make sure the destination directory exists."),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::WriteFailed { .. } | Self::FlushFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::CreateFailed { .. } => "storage.create_failed",
            Self::WriteFailed { .. } => "storage.write_failed",
            Self::FlushFailed { .. } => "storage.flush_failed",
            Self::DiskFull { .. } => "storage.disk_full",
            Self::PermissionDenied { .. } => "storage.permission_denied",
        };
        Some(code)
    }
}
