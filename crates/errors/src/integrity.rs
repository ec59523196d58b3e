//! Post-transfer integrity error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("incorrect file size ({actual}, expected: {expected})")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error(
        "incorrect {algorithm} hash ({}, expected: {expected})",
        .actual.as_deref().unwrap_or("unreadable")
    )]
    HashMismatch {
        algorithm: String,
        expected: String,
        actual: Option<String>,
    },
}

impl UserFacingError for IntegrityError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::SizeMismatch { .. } => {
                Some("The transfer was truncated or the server misreported its length.")
            }
            Self::HashMismatch { .. } => {
                Some("Verify the expected hash; the remote content may have changed.")
            }
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::SizeMismatch { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::SizeMismatch { .. } => "integrity.size_mismatch",
            Self::HashMismatch { .. } => "integrity.hash_mismatch",
        })
    }
}
