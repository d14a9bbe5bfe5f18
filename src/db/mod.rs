//! SQLite store for books, verses and API key bookkeeping
//!
//! The verse data is immutable reference data loaded at seed time; the
//! API only reads it. The single mutable column is
//! `api_keys.last_used_at`, bumped best-effort on keyed requests.
//!
//! ## Tables
//!
//! - `bible_books` - canonical books (name slug, Telugu name, testament, order)
//! - `bible_verses` - verse text keyed by (book_id, chapter, verse)
//! - `api_keys` - key records with last-used timestamps

pub mod api_keys;
pub mod books;
pub mod schema;
pub mod verses;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::ApiError;

/// SQLite database handle for the verse store
///
/// Constructed once in `main` and injected into the HTTP server; there
/// is no global connection state.
pub struct VerseDb {
    conn: Mutex<Connection>,
}

impl VerseDb {
    /// Open or create the verse database
    pub fn open(db_path: &Path) -> Result<Self, ApiError> {
        info!("Opening SQLite database at {:?}", db_path);

        let conn = Connection::open(db_path)?;

        // WAL mode for concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_schema()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, ApiError> {
        debug!("Opening in-memory SQLite database");

        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_schema()?;

        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<(), ApiError> {
        self.with_conn(|conn| schema::init_schema(conn))
    }

    /// Run a read operation against the connection
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Connection) -> Result<T, ApiError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ApiError::Internal(format!("Lock poisoned: {}", e)))?;
        f(&conn)
    }

    /// Run a write operation with exclusive access
    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ApiError>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| ApiError::Internal(format!("Lock poisoned: {}", e)))?;
        f(&mut conn)
    }

    /// Get store statistics
    pub fn stats(&self) -> Result<DbStats, ApiError> {
        self.with_conn(|conn| {
            let book_count: i64 =
                conn.query_row("SELECT COUNT(*) FROM bible_books", [], |row| row.get(0))?;
            let verse_count: i64 =
                conn.query_row("SELECT COUNT(*) FROM bible_verses", [], |row| row.get(0))?;
            let api_key_count: i64 =
                conn.query_row("SELECT COUNT(*) FROM api_keys", [], |row| row.get(0))?;

            Ok(DbStats {
                book_count: book_count as u64,
                verse_count: verse_count as u64,
                api_key_count: api_key_count as u64,
            })
        })
    }
}

/// Store statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct DbStats {
    pub book_count: u64,
    pub verse_count: u64,
    pub api_key_count: u64,
}

// Re-exports
pub use books::{BookRow, NewBook, Testament};
pub use verses::{SearchHit, VerseFilter, VerseRow};
