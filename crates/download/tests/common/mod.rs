//! In-process transport with scripted responses

#![allow(dead_code)]

use bytes::Bytes;
use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use haul_errors::NetworkError;
use haul_net::{Transport, TransportResponse, Url};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What the body does after its scripted chunks
#[derive(Debug, Clone)]
pub enum Tail {
    End,
    Hang,
    Fail(String),
}

/// Scripted reply for one URL path
#[derive(Debug, Clone)]
pub enum Reply {
    /// Headers never arrive
    Hang,
    Body {
        status: u16,
        length: Option<u64>,
        chunks: Vec<Bytes>,
        tail: Tail,
    },
}

impl Reply {
    /// 200 with an accurate length, ending after `data`
    pub fn ok(data: &[u8]) -> Self {
        Self::chunked(data, 1024)
    }

    /// 200 with an accurate length, `data` split into `chunk` sized pieces
    pub fn chunked(data: &[u8], chunk: usize) -> Self {
        Self::Body {
            status: 200,
            length: Some(data.len() as u64),
            chunks: data.chunks(chunk).map(Bytes::copy_from_slice).collect(),
            tail: Tail::End,
        }
    }

    #[must_use]
    pub fn status(mut self, code: u16) -> Self {
        if let Self::Body { status, .. } = &mut self {
            *status = code;
        }
        self
    }

    #[must_use]
    pub fn length(mut self, declared: Option<u64>) -> Self {
        if let Self::Body { length, .. } = &mut self {
            *length = declared;
        }
        self
    }

    #[must_use]
    pub fn tail(mut self, then: Tail) -> Self {
        if let Self::Body { tail, .. } = &mut self {
            *tail = then;
        }
        self
    }
}

/// Serves scripted replies keyed by URL path; unknown paths hang
#[derive(Debug, Default)]
pub struct FakeTransport {
    routes: HashMap<String, Reply>,
    fetches: AtomicUsize,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn route(mut self, path: &str, reply: Reply) -> Self {
        self.routes.insert(path.to_string(), reply);
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Transport for FakeTransport {
    fn fetch<'a>(
        &'a self,
        url: &'a Url,
    ) -> BoxFuture<'a, Result<TransportResponse, NetworkError>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let reply = self.routes.get(url.path()).cloned().unwrap_or(Reply::Hang);

        Box::pin(async move {
            match reply {
                Reply::Hang => futures::future::pending().await,
                Reply::Body {
                    status,
                    length,
                    chunks,
                    tail,
                } => {
                    let tail = match tail {
                        Tail::End => stream::empty().boxed(),
                        Tail::Hang => stream::pending().boxed(),
                        Tail::Fail(message) => {
                            stream::once(async move { Err(NetworkError::StreamFailed(message)) })
                                .boxed()
                        }
                    };
                    let body = stream::iter(chunks.into_iter().map(Ok)).chain(tail).boxed();
                    Ok(TransportResponse {
                        status,
                        content_length: length,
                        body,
                    })
                }
            }
        })
    }
}

/// Deterministic payload of `len` bytes
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
