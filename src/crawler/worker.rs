//! Crawl-loop worker
//!
//! Each worker cycles: poll the frontier, claim the seed in the visited
//! set, fetch, extract, record discovered links; the deadline flag is
//! checked at the top of every iteration. Nothing a single address does can
//! terminate the worker; termination is driven only by the flag.

use crate::crawler::extractor::extract_links;
use crate::crawler::fetcher::{Fetch, FetchOutcome};
use crate::state::CrawlContext;
use std::sync::Arc;
use std::time::Duration;

/// Per-worker counters, aggregated into the run summary
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkerStats {
    /// Seeds this worker claimed via check-and-mark
    pub claimed: u64,

    /// Claimed seeds fetched successfully
    pub fetched: u64,

    /// Claimed seeds whose fetch failed
    pub failed: u64,

    /// Links extracted and recorded from fetched pages
    pub links: u64,
}

/// Runs one worker until the deadline flag is observed
///
/// Loop per iteration:
/// 1. Poll the frontier; an exhausted frontier or an empty line means
///    "nothing ready now" - back off briefly and retry.
/// 2. Check-and-mark the seed; a seed another worker already claimed also
///    backs off.
/// 3. Fetch; on success, extract links and record each one. A fetch
///    failure is logged and counted, never fatal.
///
/// A cycle that began before the flag tripped runs to completion, so each
/// worker overruns the deadline by at most one fetch/extract/record cycle.
pub async fn run_worker<F: Fetch>(
    id: u32,
    context: Arc<CrawlContext>,
    fetcher: Arc<F>,
    backoff: Duration,
) -> WorkerStats {
    let mut stats = WorkerStats::default();

    while !context.deadline.is_set() {
        let Some(address) = context.frontier.next() else {
            tokio::time::sleep(backoff).await;
            continue;
        };

        if address.is_empty() {
            tokio::time::sleep(backoff).await;
            continue;
        }

        if context.visited.check_and_mark(&address) {
            tokio::time::sleep(backoff).await;
            continue;
        }
        stats.claimed += 1;

        tracing::info!("worker {}: visiting {}", id, address);
        match fetcher.fetch(&address).await {
            FetchOutcome::Success { body } => {
                stats.fetched += 1;
                let links = extract_links(&body, &address);
                stats.links += links.len() as u64;
                for link in &links {
                    context.visited.record_only(link);
                }
                tracing::debug!(
                    "worker {}: {} yielded {} links",
                    id,
                    address,
                    links.len()
                );
            }
            FetchOutcome::Failed { reason } => {
                stats.failed += 1;
                tracing::debug!("worker {}: fetch failed for {}: {}", id, address, reason);
            }
        }
    }

    tracing::debug!(
        "worker {}: stopping ({} claimed, {} fetched, {} failed)",
        id,
        stats.claimed,
        stats.fetched,
        stats.failed
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::fetcher::FetchFailure;
    use crate::state::{SeedFrontier, VisitedSet};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scripted fetcher: maps addresses to bodies, records every call
    struct ScriptedFetcher {
        pages: HashMap<String, String>,
        delay: Duration,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn new(pages: HashMap<String, String>) -> Self {
            Self {
                pages,
                delay: Duration::ZERO,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_delay(pages: HashMap<String, String>, delay: Duration) -> Self {
            Self {
                pages,
                delay,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Fetch for ScriptedFetcher {
        fn fetch(&self, address: &str) -> impl std::future::Future<Output = FetchOutcome> + Send {
            self.calls.lock().unwrap().push(address.to_string());
            let outcome = match self.pages.get(address) {
                Some(body) => FetchOutcome::Success { body: body.clone() },
                None => FetchOutcome::Failed {
                    reason: FetchFailure::Connect,
                },
            };
            let delay = self.delay;
            async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                outcome
            }
        }
    }

    fn context_with_seeds(seeds: Vec<&str>) -> Arc<CrawlContext> {
        Arc::new(CrawlContext::new(
            SeedFrontier::from_seeds(seeds.into_iter().map(String::from).collect()),
            VisitedSet::new(),
        ))
    }

    #[tokio::test]
    async fn test_preset_deadline_means_no_fetches() {
        let context = context_with_seeds(vec!["http://a.test"]);
        context.deadline.trip();

        let fetcher = Arc::new(ScriptedFetcher::new(HashMap::new()));
        let stats = run_worker(0, context, Arc::clone(&fetcher), Duration::from_millis(1)).await;

        assert_eq!(stats.claimed, 0);
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_worker_fetches_extracts_and_records() {
        let context = context_with_seeds(vec!["http://a.test"]);
        let pages = HashMap::from([(
            "http://a.test".to_string(),
            r#"<a href="http://b.test/x"> <a href="/local">"#.to_string(),
        )]);
        let fetcher = Arc::new(ScriptedFetcher::new(pages));

        let worker = tokio::spawn(run_worker(
            0,
            Arc::clone(&context),
            Arc::clone(&fetcher),
            Duration::from_millis(1),
        ));
        tokio::time::sleep(Duration::from_millis(50)).await;
        context.deadline.trip();
        let stats = worker.await.unwrap();

        assert_eq!(stats.claimed, 1);
        assert_eq!(stats.fetched, 1);
        assert_eq!(stats.links, 2);
        assert!(context.visited.contains("http://a.test"));
        assert!(context.visited.contains("http://b.test/x"));
        assert!(context.visited.contains("http://a.test/local"));
    }

    #[tokio::test]
    async fn test_duplicate_seed_not_fetched_twice() {
        let context = context_with_seeds(vec!["http://a.test", "http://a.test"]);
        let pages = HashMap::from([("http://a.test".to_string(), String::new())]);
        let fetcher = Arc::new(ScriptedFetcher::new(pages));

        let worker = tokio::spawn(run_worker(
            0,
            Arc::clone(&context),
            Arc::clone(&fetcher),
            Duration::from_millis(1),
        ));
        tokio::time::sleep(Duration::from_millis(50)).await;
        context.deadline.trip();
        let stats = worker.await.unwrap();

        assert_eq!(stats.claimed, 1);
        assert_eq!(fetcher.calls(), vec!["http://a.test"]);
    }

    #[tokio::test]
    async fn test_empty_lines_and_exhaustion_back_off() {
        let context = context_with_seeds(vec!["", "http://a.test", ""]);
        let pages = HashMap::from([("http://a.test".to_string(), String::new())]);
        let fetcher = Arc::new(ScriptedFetcher::new(pages));

        let worker = tokio::spawn(run_worker(
            0,
            Arc::clone(&context),
            Arc::clone(&fetcher),
            Duration::from_millis(1),
        ));
        tokio::time::sleep(Duration::from_millis(60)).await;
        context.deadline.trip();
        let stats = worker.await.unwrap();

        // Empty lines are consumed but never claimed or fetched
        assert_eq!(stats.claimed, 1);
        assert_eq!(fetcher.calls(), vec!["http://a.test"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_absorbed() {
        // No scripted page: every fetch fails
        let context = context_with_seeds(vec!["http://down.test", "http://alsodown.test"]);
        let fetcher = Arc::new(ScriptedFetcher::new(HashMap::new()));

        let worker = tokio::spawn(run_worker(
            0,
            Arc::clone(&context),
            Arc::clone(&fetcher),
            Duration::from_millis(1),
        ));
        tokio::time::sleep(Duration::from_millis(50)).await;
        context.deadline.trip();
        let stats = worker.await.unwrap();

        assert_eq!(stats.claimed, 2);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.fetched, 0);
        // Failed seeds were still claimed, atomically with dispatch
        assert!(context.visited.contains("http://down.test"));
    }

    #[tokio::test]
    async fn test_at_most_one_cycle_past_deadline() {
        // Ten seeds, one worker, a fetch slower than the deadline: the
        // cycle in flight completes, no new cycle starts.
        let seeds: Vec<String> = (0..10).map(|i| format!("http://s{}.test", i)).collect();
        let pages: HashMap<String, String> =
            seeds.iter().map(|s| (s.clone(), String::new())).collect();
        let context = Arc::new(CrawlContext::new(
            SeedFrontier::from_seeds(seeds),
            VisitedSet::new(),
        ));
        let fetcher = Arc::new(ScriptedFetcher::with_delay(
            pages,
            Duration::from_millis(200),
        ));

        let worker = tokio::spawn(run_worker(
            0,
            Arc::clone(&context),
            Arc::clone(&fetcher),
            Duration::from_millis(1),
        ));
        tokio::time::sleep(Duration::from_millis(50)).await;
        context.deadline.trip();
        let stats = worker.await.unwrap();

        assert_eq!(stats.claimed, 1);
        assert_eq!(fetcher.calls().len(), 1);
    }
}
