//! Shared crawl context and the deadline stop signal

use crate::state::{SeedFrontier, VisitedSet};
use std::sync::atomic::{AtomicBool, Ordering};

/// Write-once stop signal for the whole run
///
/// The flag starts unset and transitions to set exactly once, by the
/// deadline controller. Workers poll it at the top of every loop iteration;
/// a cycle already in flight when the flag trips runs to completion.
#[derive(Debug, Default)]
pub struct DeadlineFlag {
    fired: AtomicBool,
}

impl DeadlineFlag {
    pub fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// Returns whether the deadline has fired
    pub fn is_set(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Trips the flag; stable once set
    pub fn trip(&self) {
        self.fired.store(true, Ordering::Release);
    }
}

/// Shared state for one crawl run
///
/// Holds the deadline flag, the seed frontier, and the visited set; passed
/// by `Arc` into worker and controller start routines. Each member guards
/// its own critical section, so there is no run-global lock.
pub struct CrawlContext {
    pub deadline: DeadlineFlag,
    pub frontier: SeedFrontier,
    pub visited: VisitedSet,
}

impl CrawlContext {
    pub fn new(frontier: SeedFrontier, visited: VisitedSet) -> Self {
        Self {
            deadline: DeadlineFlag::new(),
            frontier,
            visited,
        }
    }
}
