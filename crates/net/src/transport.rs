//! The seam between the download core and an HTTP implementation

use bytes::Bytes;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use haul_errors::NetworkError;
use url::Url;

/// Response body as a stream of chunks
pub type BodyStream = BoxStream<'static, Result<Bytes, NetworkError>>;

/// Headers-received state of a single GET
///
/// Dropping the value (or just its `body`) cancels the underlying request.
pub struct TransportResponse {
    pub status: u16,
    /// Declared `Content-Length`, if the server sent a valid one
    pub content_length: Option<u64>,
    pub body: BodyStream,
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Fetch a URL as a byte stream
///
/// Implementations perform exactly one attempt. Dropping the returned future
/// before it resolves must abort the request.
pub trait Transport: Send + Sync {
    /// Issue a binary GET against `url`
    fn fetch<'a>(&'a self, url: &'a Url)
        -> BoxFuture<'a, Result<TransportResponse, NetworkError>>;
}
