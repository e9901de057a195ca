//! Record sink trait
//!
//! Every persistence target takes the full accumulated record sequence in one
//! call and reports how many records it stored.

use crate::state::CrawlRecord;
use crate::{SinkError, SinkResult};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// A persistence target for crawl records
pub trait RecordSink {
    /// Short name used in logs and outcomes
    fn name(&self) -> &'static str;

    /// Writes the records
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of records stored
    /// * `Err(SinkError::NoRecords)` - `records` was empty
    /// * `Err(SinkError)` - The target could not be written
    fn write_records(&mut self, records: &[CrawlRecord]) -> SinkResult<usize>;
}

/// Fails with [`SinkError::NoRecords`] when there is nothing to persist
pub fn ensure_records(records: &[CrawlRecord]) -> SinkResult<()> {
    if records.is_empty() {
        return Err(SinkError::NoRecords);
    }
    Ok(())
}

/// Creates `path`, refusing to overwrite an existing file
pub(crate) fn create_new(path: &Path) -> SinkResult<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => SinkError::AlreadyExists(path.display().to_string()),
            _ => SinkError::Io(e),
        })
}
