//! Tidemark: a time-bounded multi-worker web crawler
//!
//! This crate implements a crawler where a fixed pool of workers drains a
//! shared seed list, fetches each page, extracts outbound links, and records
//! every claimed or discovered address exactly once, until a run-wide
//! deadline fires.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Tidemark operations
///
/// Only startup failures and task-join failures surface here; every
/// per-address failure (fetch errors, malformed content, record writes) is
/// absorbed by the worker loop.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read seed list {path}: {source}")]
    SeedList {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to open visited record {path}: {source}")]
    Record {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Crawl task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Tidemark operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlSummary};
pub use state::{CrawlContext, DeadlineFlag, SeedFrontier, VisitedSet};
