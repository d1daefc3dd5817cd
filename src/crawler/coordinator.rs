//! Crawler lifecycle owner
//!
//! The coordinator starts one deadline controller and N workers as tasks on
//! the multi-threaded runtime, waits for the controller to finish, then
//! waits for every worker to complete its final cycle and exit. Total run
//! lifetime is the configured duration plus the tail latency of the slowest
//! in-flight cycle at the moment the deadline fires.

use crate::config::Config;
use crate::crawler::deadline::run_deadline;
use crate::crawler::fetcher::{build_http_client, Fetch, HttpFetcher};
use crate::crawler::worker::{run_worker, WorkerStats};
use crate::output::RecordWriter;
use crate::state::{CrawlContext, SeedFrontier, VisitedSet};
use crate::CrawlError;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Aggregated results of one crawl run
#[derive(Debug, Clone, Copy)]
pub struct CrawlSummary {
    /// Seeds claimed across all workers
    pub claimed: u64,

    /// Seeds fetched successfully
    pub fetched: u64,

    /// Seeds whose fetch failed
    pub failed: u64,

    /// Links discovered and recorded
    pub links: u64,

    /// Distinct addresses in the visited set at the end of the run
    pub visited: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Owns and runs one crawl: N workers plus one deadline controller
pub struct Crawler<F: Fetch + 'static> {
    workers: u32,
    run_duration: Duration,
    idle_backoff: Duration,
    context: Arc<CrawlContext>,
    fetcher: Arc<F>,
}

impl<F: Fetch + 'static> Crawler<F> {
    /// Creates a crawler over prepared shared state and a fetcher
    ///
    /// # Arguments
    ///
    /// * `workers` - Size of the worker pool
    /// * `run_duration` - Time until the deadline controller trips the flag
    /// * `idle_backoff` - Worker sleep when nothing is ready
    /// * `context` - Shared deadline flag, frontier, and visited set
    /// * `fetcher` - The fetch implementation shared by all workers
    pub fn new(
        workers: u32,
        run_duration: Duration,
        idle_backoff: Duration,
        context: CrawlContext,
        fetcher: F,
    ) -> Self {
        Self {
            workers,
            run_duration,
            idle_backoff,
            context: Arc::new(context),
            fetcher: Arc::new(fetcher),
        }
    }

    /// Runs the crawl to completion
    ///
    /// Spawns the deadline controller and every worker, joins the
    /// controller first (it alone decides when the run ends), then joins
    /// each worker and folds its counters into the summary.
    pub async fn run(self) -> Result<CrawlSummary, CrawlError> {
        let start = Instant::now();
        tracing::info!(
            "starting crawl: {} workers, {:?} deadline, {} seeds",
            self.workers,
            self.run_duration,
            self.context.frontier.len()
        );

        let controller = tokio::spawn(run_deadline(
            self.run_duration,
            Arc::clone(&self.context),
        ));

        let mut workers = Vec::with_capacity(self.workers as usize);
        for id in 0..self.workers {
            tracing::debug!("worker {} started", id);
            workers.push(tokio::spawn(run_worker(
                id,
                Arc::clone(&self.context),
                Arc::clone(&self.fetcher),
                self.idle_backoff,
            )));
        }

        controller.await?;

        let mut totals = WorkerStats::default();
        for worker in workers {
            let stats = worker.await?;
            totals.claimed += stats.claimed;
            totals.fetched += stats.fetched;
            totals.failed += stats.failed;
            totals.links += stats.links;
        }

        let summary = CrawlSummary {
            claimed: totals.claimed,
            fetched: totals.fetched,
            failed: totals.failed,
            links: totals.links,
            visited: self.context.visited.len(),
            elapsed: start.elapsed(),
        };

        tracing::info!(
            "crawl completed in {:?}: {} claimed, {} fetched, {} failed, {} links, {} visited",
            summary.elapsed,
            summary.claimed,
            summary.fetched,
            summary.failed,
            summary.links,
            summary.visited
        );

        Ok(summary)
    }
}

/// Runs the main crawl operation from a loaded configuration
///
/// Wires the external collaborators to the core:
/// 1. Opens the seed list and loads the frontier (fatal on error)
/// 2. Truncates and reopens the visited record (fatal on error)
/// 3. Builds the HTTP client and the bounded fetcher
/// 4. Runs the worker pool against the deadline
///
/// # Arguments
///
/// * `config` - The validated crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - The run's aggregated counters
/// * `Err(CrawlError)` - A startup failure; nothing fails mid-run
pub async fn run_crawl(config: Config) -> Result<CrawlSummary, CrawlError> {
    let seed_path = PathBuf::from(&config.input.seed_path);
    let seed_file = File::open(&seed_path).map_err(|source| CrawlError::SeedList {
        path: seed_path.clone(),
        source,
    })?;
    let frontier = SeedFrontier::from_reader(
        BufReader::new(seed_file),
        config.crawler.max_address_len,
    )
    .map_err(|source| CrawlError::SeedList {
        path: seed_path,
        source,
    })?;

    let visited_path = Path::new(&config.output.visited_path);
    let recorder = RecordWriter::create(visited_path).map_err(|source| CrawlError::Record {
        path: visited_path.to_path_buf(),
        source,
    })?;
    let visited = VisitedSet::with_recorder(recorder);

    let client = build_http_client(&config.user_agent)?;
    let fetcher = HttpFetcher::new(client, config.crawler.fetch_concurrency);

    let crawler = Crawler::new(
        config.crawler.workers,
        Duration::from_secs(config.crawler.run_duration_secs),
        Duration::from_millis(config.crawler.idle_backoff_ms),
        CrawlContext::new(frontier, visited),
        fetcher,
    );

    crawler.run().await
}
