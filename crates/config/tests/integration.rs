//! Integration tests for config

#[cfg(test)]
mod tests {
    use haul_config::*;
    use haul_hash::HashAlgorithm;
    use std::io::Write;
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    const ALL_VARS: [&str; 5] = [
        ENV_PROGRESS_INTERVAL_MS,
        ENV_HASH_ALGORITHM,
        ENV_REQUIRE_SUCCESS_STATUS,
        ENV_USER_AGENT,
        ENV_MAX_REDIRECTS,
    ];

    fn clear_env() {
        for var in ALL_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.download.progress_interval(), Duration::from_millis(500));
        assert_eq!(config.download.hash_algorithm, HashAlgorithm::Sha1);
        assert!(config.download.require_success_status);
        assert_eq!(config.network.max_redirects, 10);
        assert!(config.network.user_agent.starts_with("haul/"));
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[download]
progress_interval_ms = 250
hash_algorithm = "sha256"
require_success_status = false

[network]
user_agent = "mirror-sync/2.0"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.download.progress_interval_ms, 250);
        assert_eq!(config.download.hash_algorithm, HashAlgorithm::Sha256);
        assert!(!config.download.require_success_status);
        // unspecified fields keep their defaults
        assert_eq!(config.download.speed_window, DEFAULT_SPEED_WINDOW);
        assert_eq!(config.network.user_agent, "mirror-sync/2.0");
        assert_eq!(config.network.max_redirects, DEFAULT_MAX_REDIRECTS);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from_file(&dir.path().join("absent.toml")).await;
        assert!(matches!(
            result,
            Err(haul_errors::Error::Config(haul_errors::ConfigError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_parse_error() {
        let result = Config::from_toml("[download]\nprogress_interval_ms = \"fast\"");
        assert!(matches!(
            result,
            Err(haul_errors::Error::Config(haul_errors::ConfigError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var(ENV_PROGRESS_INTERVAL_MS, "100");
        std::env::set_var(ENV_HASH_ALGORITHM, "blake3");
        std::env::set_var(ENV_REQUIRE_SUCCESS_STATUS, "no");
        std::env::set_var(ENV_MAX_REDIRECTS, "0");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.download.progress_interval_ms, 100);
        assert_eq!(config.download.hash_algorithm, HashAlgorithm::Blake3);
        assert!(!config.download.require_success_status);
        assert_eq!(config.network.max_redirects, 0);

        clear_env();
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var(ENV_HASH_ALGORITHM, "md5");

        let mut config = Config::default();
        let result = config.merge_env();
        assert!(result.is_err());

        clear_env();
    }
}
