use haul_config::Config;
use haul_hash::HashAlgorithm;
use std::time::Duration;

/// Behaviour of a single transfer
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadConfig {
    /// Minimum time between two progress events
    pub progress_interval: Duration,
    /// Digest used to check a job's expected hash
    pub hash_algorithm: HashAlgorithm,
    /// Fail on a non-2xx response before anything is written
    pub require_success_status: bool,
    /// Number of progress samples the speed is averaged over
    pub speed_window: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for DownloadConfig {
    fn from(config: &Config) -> Self {
        Self {
            progress_interval: config.download.progress_interval(),
            hash_algorithm: config.download.hash_algorithm,
            require_success_status: config.download.require_success_status,
            speed_window: config.download.speed_window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_config() {
        let config = DownloadConfig::default();
        assert_eq!(config.progress_interval, Duration::from_millis(500));
        assert_eq!(config.hash_algorithm, HashAlgorithm::Sha1);
        assert!(config.require_success_status);
    }
}
