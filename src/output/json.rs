//! JSON record sink and stdout dump

use super::traits::{create_new, ensure_records, RecordSink};
use crate::state::CrawlRecord;
use crate::SinkResult;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Writes records as a JSON array of objects to a new file
#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for JsonSink {
    fn name(&self) -> &'static str {
        "json"
    }

    fn write_records(&mut self, records: &[CrawlRecord]) -> SinkResult<usize> {
        ensure_records(records)?;

        let file = create_new(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(records.len())
    }
}

/// Dumps records as one JSON array to `writer`
///
/// Used when no output file is configured. An empty record set dumps `[]`.
pub fn dump_records<W: Write>(mut writer: W, records: &[CrawlRecord]) -> SinkResult<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
