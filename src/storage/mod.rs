//! Storage module for persisting crawl records
//!
//! This module handles the relational sink:
//! - SQLite database initialization and schema management
//! - Inserting records with primary-key de-duplication

mod schema;
mod sqlite;

pub use sqlite::{save_records, SqliteStorage};
