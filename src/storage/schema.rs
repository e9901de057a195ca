//! Database schema definitions
//!
//! The relational sink uses a single table. The composite primary key makes
//! re-inserting an identical `(Source, Url, Text)` row a no-op.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS "SiteScrape" (
    "Timestamp" TEXT,
    "Source" TEXT,
    "Url" TEXT,
    "Text" TEXT,
    PRIMARY KEY ("Source", "Url", "Text")
);
"#;

/// Inserts a record unless an identical key is already stored
pub const INSERT_SQL: &str = r#"
INSERT OR IGNORE INTO "SiteScrape" ("Timestamp", "Source", "Url", "Text")
VALUES (?1, ?2, ?3, ?4)
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::{params, Connection};

    #[test]
    fn test_schema_initializes() {
        let conn = Connection::open_in_memory().unwrap();
        let result = initialize_schema(&conn);
        assert!(result.is_ok());
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        // Initialize twice
        initialize_schema(&conn).unwrap();
        let result = initialize_schema(&conn);

        // Should succeed the second time too
        assert!(result.is_ok());
    }

    #[test]
    fn test_table_exists_after_init() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='SiteScrape'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_duplicate_key_ignored() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let first = conn
            .execute(INSERT_SQL, params!["t1", "src", "/a", "text"])
            .unwrap();
        let second = conn
            .execute(INSERT_SQL, params!["t2", "src", "/a", "text"])
            .unwrap();
        let different_text = conn
            .execute(INSERT_SQL, params!["t3", "src", "/a", "other"])
            .unwrap();

        assert_eq!((first, second, different_text), (1, 0, 1));
    }
}
