#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for haul
//!
//! This crate is the transport collaborator of the download core: it turns
//! a URL into a status, a declared length and an abortable byte stream.
//! Every request is a single attempt; nothing here retries or times out.

mod client;
mod transport;
mod validation;

pub use client::{NetClient, NetConfig};
pub use transport::{BodyStream, Transport, TransportResponse};
pub use validation::{parse_url, validate_status};

pub use url::Url;
