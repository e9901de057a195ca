//! Output module for persisting records and summarizing runs
//!
//! This module handles:
//! - Writing records to the JSON and TSV file sinks
//! - Dumping records to stdout when no sink is configured
//! - Recording crawl statistics

mod json;
pub mod stats;
mod traits;
mod tsv;

pub use json::{dump_records, JsonSink};
pub use stats::{print_summary, CrawlSummary};
pub use traits::{ensure_records, RecordSink};
pub use tsv::TsvSink;

use crate::config::OutputTargets;
use crate::state::CrawlRecord;
use crate::storage::save_records;
use crate::SinkResult;
use std::path::{Path, PathBuf};

/// Result of writing to one sink
#[derive(Debug)]
pub struct SinkOutcome {
    /// Sink name
    pub sink: &'static str,

    /// Target path, `None` for the stdout dump
    pub path: Option<PathBuf>,

    /// Records stored, or why the write failed
    pub result: SinkResult<usize>,
}

/// Writes the records to every configured sink
///
/// Each sink is attempted independently; one failing does not stop the
/// others. With no sink configured the records are dumped to stdout.
///
/// # Arguments
///
/// * `records` - Every record collected by the run
/// * `targets` - Configured output paths
///
/// # Returns
///
/// One outcome per attempted sink, in JSON, TSV, SQLite order
pub fn persist_all(records: &[CrawlRecord], targets: &OutputTargets) -> Vec<SinkOutcome> {
    let mut outcomes = Vec::new();

    if targets.is_empty() {
        let result = dump_records(std::io::stdout().lock(), records).map(|()| records.len());
        outcomes.push(SinkOutcome {
            sink: "stdout",
            path: None,
            result,
        });
        return outcomes;
    }

    if let Some(path) = &targets.json {
        outcomes.push(write_to(&mut JsonSink::new(path), path, records));
    }

    if let Some(path) = &targets.tsv {
        outcomes.push(write_to(&mut TsvSink::new(path), path, records));
    }

    if let Some(path) = &targets.db {
        let result = save_records(path, records);
        log_outcome("sqlite", path, &result);
        outcomes.push(SinkOutcome {
            sink: "sqlite",
            path: Some(path.clone()),
            result,
        });
    }

    outcomes
}

fn write_to<S: RecordSink>(sink: &mut S, path: &Path, records: &[CrawlRecord]) -> SinkOutcome {
    let result = sink.write_records(records);
    log_outcome(sink.name(), path, &result);
    SinkOutcome {
        sink: sink.name(),
        path: Some(path.to_path_buf()),
        result,
    }
}

fn log_outcome(sink: &str, path: &Path, result: &SinkResult<usize>) {
    match result {
        Ok(count) => tracing::info!("Saved {} records to {} ({})", count, path.display(), sink),
        Err(e) => tracing::error!("Failed to save to {} ({}): {}", path.display(), sink, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStorage;
    use crate::SinkError;

    fn records() -> Vec<CrawlRecord> {
        vec![CrawlRecord::new("vox", "/a", "alpha")]
    }

    #[test]
    fn test_persist_all_writes_every_sink() {
        let dir = tempfile::tempdir().unwrap();
        let targets = OutputTargets {
            json: Some(dir.path().join("out.json")),
            tsv: Some(dir.path().join("out.tsv")),
            db: Some(dir.path().join("out.db")),
        };

        let outcomes = persist_all(&records(), &targets);

        let sinks: Vec<_> = outcomes.iter().map(|o| o.sink).collect();
        assert_eq!(sinks, vec!["json", "tsv", "sqlite"]);
        assert!(outcomes.iter().all(|o| matches!(o.result, Ok(1))));
        assert!(dir.path().join("out.json").exists());
        assert!(dir.path().join("out.tsv").exists());
    }

    #[test]
    fn test_persist_all_sinks_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("out.json");
        std::fs::write(&json, "[]").unwrap();
        let targets = OutputTargets {
            json: Some(json),
            tsv: None,
            db: Some(dir.path().join("out.db")),
        };

        let outcomes = persist_all(&records(), &targets);

        assert!(matches!(
            outcomes[0].result,
            Err(SinkError::AlreadyExists(_))
        ));
        assert!(matches!(outcomes[1].result, Ok(1)));
        let storage = SqliteStorage::open(&dir.path().join("out.db")).unwrap();
        assert_eq!(storage.count_rows().unwrap(), 1);
    }

    #[test]
    fn test_persist_all_empty_records_fail_each_sink() {
        let dir = tempfile::tempdir().unwrap();
        let targets = OutputTargets {
            json: Some(dir.path().join("out.json")),
            tsv: Some(dir.path().join("out.tsv")),
            db: None,
        };

        let outcomes = persist_all(&[], &targets);

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes
            .iter()
            .all(|o| matches!(o.result, Err(SinkError::NoRecords))));
    }

    #[test]
    fn test_persist_all_without_targets_dumps() {
        let outcomes = persist_all(&records(), &OutputTargets::default());

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].sink, "stdout");
        assert!(outcomes[0].path.is_none());
        assert!(matches!(outcomes[0].result, Ok(1)));
    }
}
