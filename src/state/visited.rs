//! Visited set - the shared deduplication store
//!
//! Membership test and insert happen as one operation under one lock, so no
//! two workers can both observe "absent" for the same address and
//! double-fetch it. Appending a newly marked address to the visited record
//! is a side effect of the first successful mark, not the membership
//! mechanism itself.

use crate::output::RecordWriter;
use std::collections::HashSet;
use std::sync::Mutex;

/// Shared set of addresses considered claimed
///
/// Used both to prevent double-fetching of seeds and to record discovered
/// links. Matching is case-sensitive and byte-exact. The set is emptied at
/// startup and grows monotonically for the run's duration.
pub struct VisitedSet {
    inner: Mutex<VisitedInner>,
}

struct VisitedInner {
    seen: HashSet<String>,
    recorder: Option<RecordWriter>,
}

impl VisitedSet {
    /// Creates a visited set with no record file attached
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(VisitedInner {
                seen: HashSet::new(),
                recorder: None,
            }),
        }
    }

    /// Creates a visited set that appends each first-seen address to `recorder`
    pub fn with_recorder(recorder: RecordWriter) -> Self {
        Self {
            inner: Mutex::new(VisitedInner {
                seen: HashSet::new(),
                recorder: Some(recorder),
            }),
        }
    }

    /// Inserts `address` if absent and reports whether it was already present
    ///
    /// This is a single critical section: two concurrent callers for the
    /// same address see exactly one `false` between them. On a first
    /// insert, the address is appended to the record file; a failed append
    /// is logged and does not unwind the mark.
    pub fn check_and_mark(&self, address: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let VisitedInner { seen, recorder } = &mut *inner;

        if !seen.insert(address.to_string()) {
            return true;
        }

        if let Some(recorder) = recorder {
            if let Err(e) = recorder.append(address) {
                tracing::warn!("failed to record {}: {}", address, e);
            }
        }

        false
    }

    /// Inserts a discovered link as a bookkeeping entry
    ///
    /// Same semantics as [`check_and_mark`](Self::check_and_mark), but the
    /// caller does not act on the verdict: a link already present is simply
    /// not re-recorded and produces no side effect.
    pub fn record_only(&self, address: &str) {
        let _ = self.check_and_mark(address);
    }

    /// Returns whether `address` has been marked
    pub fn contains(&self, address: &str) -> bool {
        self.inner.lock().unwrap().seen.contains(address)
    }

    /// Returns the number of marked addresses
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for VisitedSet {
    fn default() -> Self {
        Self::new()
    }
}
