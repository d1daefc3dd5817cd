//! HTTP fetcher with a bounded concurrency gate
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with a proper user agent string
//! - Bounding the number of in-flight fetches across all workers
//! - Classifying failures so the worker loop can absorb them

use crate::config::UserAgentConfig;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched the page
    Success {
        /// Page body content
        body: String,
    },

    /// The fetch failed; never fatal to the worker loop
    Failed {
        /// Classified failure reason
        reason: FetchFailure,
    },
}

/// Classified fetch failure
///
/// The caller treats every variant the same way (zero links discovered,
/// loop continues); the classification exists for logging and counters.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("request timeout")]
    Timeout,

    #[error("connection failed")]
    Connect,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Seam for substituting the fetcher in tests
///
/// Production code uses [`HttpFetcher`]; worker tests script outcomes
/// without a network.
pub trait Fetch: Send + Sync {
    fn fetch(&self, address: &str) -> impl Future<Output = FetchOutcome> + Send;
}

/// Builds the HTTP client used by all workers
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &UserAgentConfig) -> Result<reqwest::Client, reqwest::Error> {
    let user_agent = format!("{}/{}", config.crawler_name, config.crawler_version);

    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Bounded-concurrency wrapper around the HTTP client
///
/// At most K fetches are in flight across all workers at any instant,
/// enforced by a counting semaphore: a worker whose fetch cannot start
/// waits on the gate without busy-polling. K=1 reproduces fully serialized
/// fetching as an explicit configuration choice.
pub struct HttpFetcher {
    client: reqwest::Client,
    gate: Arc<Semaphore>,
}

impl HttpFetcher {
    /// Creates a fetcher with a gate of `concurrency` permits
    pub fn new(client: reqwest::Client, concurrency: u32) -> Self {
        Self {
            client,
            gate: Arc::new(Semaphore::new(concurrency as usize)),
        }
    }

    /// Returns the number of currently free fetch slots
    pub fn available_slots(&self) -> usize {
        self.gate.available_permits()
    }

    async fn fetch_inner(&self, address: &str) -> FetchOutcome {
        // The gate is never closed while the fetcher is alive
        let _permit = match self.gate.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                return FetchOutcome::Failed {
                    reason: FetchFailure::Transport("fetch gate closed".to_string()),
                }
            }
        };

        let response = match self.client.get(address).send().await {
            Ok(response) => response,
            Err(e) => {
                return FetchOutcome::Failed {
                    reason: classify_error(&e),
                }
            }
        };

        let status = response.status();
        if !status.is_success() {
            return FetchOutcome::Failed {
                reason: FetchFailure::Status(status.as_u16()),
            };
        }

        // Body assembly failures (including allocation pressure while
        // buffering a large page) are fatal to this fetch only.
        match response.text().await {
            Ok(body) => FetchOutcome::Success { body },
            Err(e) => FetchOutcome::Failed {
                reason: FetchFailure::Transport(e.to_string()),
            },
        }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, address: &str) -> impl Future<Output = FetchOutcome> + Send {
        self.fetch_inner(address)
    }
}

/// Classifies a reqwest error into a fetch failure
fn classify_error(error: &reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_connect() {
        FetchFailure::Connect
    } else {
        FetchFailure::Transport(error.to_string())
    }
}
