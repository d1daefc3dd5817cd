//! Shared crawl state
//!
//! This module provides the state shared between workers during a run.
//!
//! # Components
//!
//! - `DeadlineFlag`: write-once stop signal owned by the deadline controller
//! - `CrawlContext`: the shared-state bundle (flag, frontier, visited set)
//!   passed into worker and controller start routines
//! - `SeedFrontier`: mutually-exclusive sequential reader over the seed list
//! - `VisitedSet`: deduplication store with an atomic check-and-mark

mod context;
mod frontier;
mod visited;

// Re-export main types
pub use context::{CrawlContext, DeadlineFlag};
pub use frontier::SeedFrontier;
pub use visited::VisitedSet;
