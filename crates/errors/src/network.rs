//! Network-related error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum NetworkError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("unsupported protocol: {protocol}")]
    UnsupportedProtocol { protocol: String },

    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("stream failed: {0}")]
    StreamFailed(String),

    #[error("HTTP error {status}: {message}")]
    HttpError { status: u16, message: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl UserFacingError for NetworkError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidUrl(_) | Self::UnsupportedProtocol { .. } => {
                Some("Use an absolute http:// or https:// URL.")
            }
            Self::ConnectionFailed(_) | Self::StreamFailed(_) => {
                Some("Check your network connection and retry the download.")
            }
            Self::HttpError { status, .. } if *status == 404 => {
                Some("The server does not have the requested resource.")
            }
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::StreamFailed(_) => true,
            Self::HttpError { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::InvalidUrl(_) => "network.invalid_url",
            Self::UnsupportedProtocol { .. } => "network.unsupported_protocol",
            Self::ConnectionFailed(_) => "network.connection_failed",
            Self::StreamFailed(_) => "network.stream_failed",
            Self::HttpError { .. } => "network.http_error",
            Self::ClientBuild(_) => "network.client_build",
        };
        Some(code)
    }
}
