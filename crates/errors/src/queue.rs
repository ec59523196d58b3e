//! Queue usage error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("queue has already been started")]
    AlreadyStarted,

    #[error("queue has already ended")]
    AlreadyEnded,
}

impl UserFacingError for QueueError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        Some("Queues are single-use: add every job before start() and build a new queue to run again.")
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::AlreadyStarted => "queue.already_started",
            Self::AlreadyEnded => "queue.already_ended",
        })
    }
}
