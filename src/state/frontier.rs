//! Seed frontier - the shared source of not-yet-dispatched addresses
//!
//! The seed list is loaded once at startup and consumed destructively:
//! each line is delivered to exactly one caller, in original order. The
//! cursor is guarded by a mutex so concurrent workers never observe the
//! same seed.

use std::io::BufRead;
use std::sync::Mutex;

/// Shared, mutually-exclusive sequential reader over the seed list
pub struct SeedFrontier {
    inner: Mutex<FrontierCursor>,
}

struct FrontierCursor {
    seeds: Vec<String>,
    next: usize,
}

impl SeedFrontier {
    /// Creates a frontier over an already-loaded seed list
    ///
    /// Primarily useful for tests; production code goes through
    /// [`SeedFrontier::from_reader`].
    pub fn from_seeds(seeds: Vec<String>) -> Self {
        Self {
            inner: Mutex::new(FrontierCursor { seeds, next: 0 }),
        }
    }

    /// Loads a newline-delimited seed list from a reader
    ///
    /// Each line is stripped of its trailing carriage return (if any) and
    /// truncated to `max_address_len` bytes at a UTF-8 character boundary.
    /// Empty lines are preserved; the worker loop treats them as "nothing
    /// ready now" rather than dropping them here, so the line count seen by
    /// operators matches the file.
    ///
    /// # Arguments
    ///
    /// * `reader` - Source of seed lines
    /// * `max_address_len` - Maximum length of one address, in bytes
    ///
    /// # Returns
    ///
    /// * `Ok(SeedFrontier)` - Frontier over all lines read
    /// * `Err(std::io::Error)` - The underlying reader failed
    pub fn from_reader<R: BufRead>(reader: R, max_address_len: usize) -> std::io::Result<Self> {
        let mut seeds = Vec::new();
        for line in reader.lines() {
            let mut line = line?;
            if line.ends_with('\r') {
                line.pop();
            }
            truncate_to_boundary(&mut line, max_address_len);
            seeds.push(line);
        }
        Ok(Self::from_seeds(seeds))
    }

    /// Delivers the next seed, advancing the shared cursor
    ///
    /// Exactly one caller receives each seed. Returns `None` once the list
    /// is exhausted; callers treat that as "nothing ready now" and keep
    /// polling against the deadline, not as a terminal condition.
    pub fn next(&self) -> Option<String> {
        let mut cursor = self.inner.lock().unwrap();
        if cursor.next >= cursor.seeds.len() {
            return None;
        }
        let idx = cursor.next;
        let seed = std::mem::take(&mut cursor.seeds[idx]);
        cursor.next += 1;
        Some(seed)
    }

    /// Returns the number of seeds not yet delivered
    pub fn remaining(&self) -> usize {
        let cursor = self.inner.lock().unwrap();
        cursor.seeds.len() - cursor.next
    }

    /// Returns the total number of seed lines loaded
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Truncates a string to at most `max_len` bytes without splitting a
/// multi-byte character.
fn truncate_to_boundary(s: &mut String, max_len: usize) {
    if s.len() <= max_len {
        return;
    }
    let mut cut = max_len;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
}
