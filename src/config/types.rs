use serde::Deserialize;

/// Main configuration structure for Tidemark
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of concurrent crawl workers
    pub workers: u32,

    /// Run duration in seconds; the deadline fires once this elapses
    #[serde(rename = "run-duration-secs")]
    pub run_duration_secs: u64,

    /// Maximum number of fetches in flight at once, across all workers
    #[serde(rename = "fetch-concurrency", default = "default_fetch_concurrency")]
    pub fetch_concurrency: u32,

    /// Backoff between polls when a worker has nothing to do (milliseconds)
    #[serde(rename = "idle-backoff-ms", default = "default_idle_backoff_ms")]
    pub idle_backoff_ms: u64,

    /// Seed lines longer than this are truncated at load time (bytes)
    #[serde(rename = "max-address-len", default = "default_max_address_len")]
    pub max_address_len: usize,
}

fn default_fetch_concurrency() -> u32 {
    4
}

fn default_idle_backoff_ms() -> u64 {
    100
}

fn default_max_address_len() -> usize {
    2048
}

/// Input configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Path to the newline-delimited seed list
    #[serde(rename = "seed-path")]
    pub seed_path: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the visited record file (truncated at startup)
    #[serde(rename = "visited-path")]
    pub visited_path: String,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}
