use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One requested download: where from, where to, and what to expect
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobDescriptor {
    /// Absolute `http`/`https` URL
    pub url: String,
    /// Destination path, overwritten if it exists
    pub file: PathBuf,
    /// Expected lowercase hex digest, `None` skips the hash check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl JobDescriptor {
    #[must_use]
    pub fn new(url: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            file: file.into(),
            hash: None,
        }
    }

    #[must_use]
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }
}

impl fmt::Display for JobDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.url, self.file.display())
    }
}
