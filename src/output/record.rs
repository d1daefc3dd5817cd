use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Append-only writer for the visited record
///
/// Created fresh at the start of each run, truncating any previous record.
/// Each line is `address\n` with no other fields, flushed immediately so
/// the record survives an abrupt exit mid-run.
pub struct RecordWriter {
    writer: BufWriter<File>,
}

impl RecordWriter {
    /// Creates (or truncates) the record file at `path`
    pub fn create(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Appends one address line and flushes it
    pub fn append(&mut self, address: &str) -> std::io::Result<()> {
        writeln!(self.writer, "{}", address)?;
        self.writer.flush()
    }
}
