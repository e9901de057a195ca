//! Tab-delimited record sink

use super::traits::{create_new, ensure_records, RecordSink};
use crate::state::{CrawlRecord, RECORD_FIELDS};
use crate::SinkResult;
use std::path::PathBuf;

const DELIMITER: u8 = b'\t';

/// Writes a header row of field names, then one row per record
///
/// Fields holding the delimiter, quotes, or line breaks are quoted, so a raw
/// link with a tab or newline in it still occupies a single row.
#[derive(Debug, Clone)]
pub struct TsvSink {
    path: PathBuf,
}

impl TsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for TsvSink {
    fn name(&self) -> &'static str {
        "tsv"
    }

    fn write_records(&mut self, records: &[CrawlRecord]) -> SinkResult<usize> {
        ensure_records(records)?;

        let file = create_new(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .from_writer(file);

        writer.write_record(RECORD_FIELDS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(records.len())
    }
}
