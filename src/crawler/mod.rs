//! Crawler module - the concurrency core
//!
//! This module contains the crawl machinery:
//! - The worker pool and its crawl-loop state machine
//! - HTTP fetching behind a bounded concurrency gate
//! - Substring link extraction
//! - The deadline controller and run lifecycle

mod coordinator;
mod deadline;
mod extractor;
mod fetcher;
mod worker;

pub use coordinator::{run_crawl, CrawlSummary, Crawler};
pub use deadline::run_deadline;
pub use extractor::extract_links;
pub use fetcher::{build_http_client, Fetch, FetchFailure, FetchOutcome, HttpFetcher};
pub use worker::{run_worker, WorkerStats};

use crate::config::Config;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Load the seed list and reset the visited record
/// 2. Build the HTTP client and bounded fetcher
/// 3. Start the worker pool and the deadline controller
/// 4. Join everything and return the run summary
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl completed; counters for the run
/// * `Err(CrawlError)` - Startup failed
pub async fn crawl(config: Config) -> Result<CrawlSummary, CrawlError> {
    run_crawl(config).await
}
