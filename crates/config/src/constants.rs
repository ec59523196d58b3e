//! Default values and environment variable names

pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 500;
pub const DEFAULT_SPEED_WINDOW: usize = 8;
pub const DEFAULT_MAX_REDIRECTS: usize = 10;
pub const DEFAULT_POOL_IDLE_TIMEOUT_SECS: u64 = 90;
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 4;

pub const ENV_PROGRESS_INTERVAL_MS: &str = "HAUL_PROGRESS_INTERVAL_MS";
pub const ENV_HASH_ALGORITHM: &str = "HAUL_HASH_ALGORITHM";
pub const ENV_REQUIRE_SUCCESS_STATUS: &str = "HAUL_REQUIRE_SUCCESS_STATUS";
pub const ENV_USER_AGENT: &str = "HAUL_USER_AGENT";
pub const ENV_MAX_REDIRECTS: &str = "HAUL_MAX_REDIRECTS";
