//! Deadline controller
//!
//! One task per run: sleep for the configured duration, then trip the stop
//! flag exactly once. It does not interrupt in-flight work; workers observe
//! the flag at their next loop head.

use crate::state::CrawlContext;
use std::sync::Arc;
use std::time::Duration;

/// Sleeps for `duration`, then trips the run's deadline flag
pub async fn run_deadline(duration: Duration, context: Arc<CrawlContext>) {
    tokio::time::sleep(duration).await;
    context.deadline.trip();
    tracing::info!("deadline fired after {:?}, signaling workers to stop", duration);
}
