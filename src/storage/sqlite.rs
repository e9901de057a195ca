//! SQLite storage implementation
//!
//! This module provides the relational record sink.

use crate::output::{ensure_records, RecordSink};
use crate::state::CrawlRecord;
use crate::storage::schema::{initialize_schema, INSERT_SQL};
use crate::SinkResult;
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) a database and ensures the table exists
    ///
    /// Unlike the file sinks, an existing database is appended to.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(SinkError)` - Failed to open database
    pub fn open(path: &Path) -> SinkResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> SinkResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Number of stored rows
    pub fn count_rows(&self) -> SinkResult<u64> {
        let count: i64 = self
            .conn
            .query_row(r#"SELECT COUNT(*) FROM "SiteScrape""#, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Loads every stored row, ordered by source and URL
    pub fn load_records(&self) -> SinkResult<Vec<CrawlRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT "Timestamp", "Source", "Url", "Text" FROM "SiteScrape"
            ORDER BY "Source", "Url", "Text"
            "#,
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok(CrawlRecord {
                    timestamp: row.get(0)?,
                    source: row.get(1)?,
                    url: row.get(2)?,
                    text: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }
}

impl RecordSink for SqliteStorage {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    /// Inserts every record in one transaction, skipping duplicate keys
    ///
    /// # Returns
    ///
    /// The number of rows actually stored
    fn write_records(&mut self, records: &[CrawlRecord]) -> SinkResult<usize> {
        ensure_records(records)?;

        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(INSERT_SQL)?;
            for record in records {
                inserted += stmt.execute(params![
                    record.timestamp,
                    record.source,
                    record.url,
                    record.text
                ])?;
            }
        }
        tx.commit()?;

        Ok(inserted)
    }
}

/// Opens the database at `path` and writes the records to it
///
/// The empty-records check happens before the file is touched.
pub fn save_records(path: &Path, records: &[CrawlRecord]) -> SinkResult<usize> {
    ensure_records(records)?;
    let mut storage = SqliteStorage::open(path)?;
    storage.write_records(records)
}
