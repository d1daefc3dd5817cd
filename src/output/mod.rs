//! Output module for the visited record
//!
//! The visited record is the crawler's only durable artifact: an
//! append-only, newline-delimited list of every address claimed or
//! discovered during the run, reset to empty at startup.

mod record;

pub use record::RecordWriter;
