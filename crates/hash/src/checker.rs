//! Post-transfer verification of a written destination file

use crate::{file_digest, file_size, normalize_hex, HashAlgorithm};
use haul_errors::IntegrityError;
use std::path::Path;

/// Verifies a file on disk against an expected size and hash
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegrityChecker {
    algorithm: HashAlgorithm,
}

impl IntegrityChecker {
    #[must_use]
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Digest of `path` with this checker's algorithm, `None` when unreadable
    pub async fn digest(&self, path: &Path) -> Option<String> {
        file_digest(path, self.algorithm).await
    }

    /// Size of `path` in bytes, `0` when missing
    pub async fn size(&self, path: &Path) -> u64 {
        file_size(path).await
    }

    /// Check a written file.
    ///
    /// The size is compared only when `expected_size > 0`; an unknown length
    /// skips the check. The hash is compared only when one is supplied and
    /// the size check passed.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` or `HashMismatch` describing the first check
    /// that failed.
    pub async fn verify(
        &self,
        path: &Path,
        expected_size: u64,
        expected_hash: Option<&str>,
    ) -> Result<(), IntegrityError> {
        if expected_size > 0 {
            let actual = self.size(path).await;
            if actual != expected_size {
                return Err(IntegrityError::SizeMismatch {
                    expected: expected_size,
                    actual,
                });
            }
        }

        if let Some(expected) = expected_hash {
            let expected = normalize_hex(expected);
            let actual = self.digest(path).await;
            if actual.as_deref() != Some(expected.as_str()) {
                return Err(IntegrityError::HashMismatch {
                    algorithm: self.algorithm.name().to_string(),
                    expected,
                    actual,
                });
            }
        }

        Ok(())
    }
}
