#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Content digests and size lookups for haul
//!
//! This crate provides the primitives used for post-transfer integrity
//! verification. File lookups never fail: a missing or unreadable file
//! yields no digest and a size of zero, so callers can verify partially
//! written or already removed destinations without extra error plumbing.

mod checker;

pub use checker::IntegrityChecker;

use serde::{Deserialize, Serialize};
use sha2::Digest;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Size of chunks for streaming hash computation
const CHUNK_SIZE: usize = 64 * 1024; // 64KB

/// Digest algorithm used for hash verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// 160-bit SHA-1, the default for job descriptors
    #[default]
    Sha1,
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    /// Canonical lowercase name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }

    /// Length of the hex encoded digest
    #[must_use]
    pub fn hex_len(self) -> usize {
        match self {
            Self::Sha1 => 40,
            Self::Sha256 | Self::Blake3 => 64,
        }
    }

    fn hasher(self) -> Hasher {
        match self {
            Self::Sha1 => Hasher::Sha1(sha1::Sha1::new()),
            Self::Sha256 => Hasher::Sha256(sha2::Sha256::new()),
            Self::Blake3 => Hasher::Blake3(Box::new(blake3::Hasher::new())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "blake3" => Ok(Self::Blake3),
            other => Err(format!("unknown hash algorithm: {other}")),
        }
    }
}

/// Incremental hasher over any supported algorithm
enum Hasher {
    Sha1(sha1::Sha1),
    Sha256(sha2::Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl Hasher {
    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Sha1(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
            Self::Blake3(h) => {
                h.update(data);
            }
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Self::Sha1(h) => hex::encode(h.finalize()),
            Self::Sha256(h) => hex::encode(h.finalize()),
            Self::Blake3(h) => h.finalize().to_hex().to_string(),
        }
    }
}

/// Normalize a hex digest for comparison (trimmed, lowercase)
#[must_use]
pub fn normalize_hex(digest: &str) -> String {
    digest.trim().to_ascii_lowercase()
}

/// Compute the lowercase hex digest of a byte slice
#[must_use]
pub fn data_digest(data: &[u8], algorithm: HashAlgorithm) -> String {
    let mut hasher = algorithm.hasher();
    hasher.update(data);
    hasher.finalize_hex()
}

/// Compute the lowercase hex digest of a file
///
/// Returns `None` if the file cannot be opened or read.
pub async fn file_digest(path: &Path, algorithm: HashAlgorithm) -> Option<String> {
    let mut file = match File::open(path).await {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "digest: cannot open file");
            return None;
        }
    };

    let mut hasher = algorithm.hasher();
    let mut buffer = vec![0; CHUNK_SIZE];

    loop {
        let n = match file.read(&mut buffer).await {
            Ok(n) => n,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "digest: read failed");
                return None;
            }
        };
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Some(hasher.finalize_hex())
}

/// Get the size of a file in bytes
///
/// Returns `0` if the file does not exist or its metadata cannot be read.
pub async fn file_size(path: &Path) -> u64 {
    tokio::fs::metadata(path)
        .await
        .map(|metadata| metadata.len())
        .unwrap_or(0)
}
