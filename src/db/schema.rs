//! Database schema definitions

use rusqlite::Connection;
use tracing::info;

use crate::error::ApiError;

/// Current schema version for migrations
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<(), ApiError> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Creating new database schema v{}", SCHEMA_VERSION);
        create_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        info!(
            "Migrating schema from v{} to v{}",
            current_version, SCHEMA_VERSION
        );
        migrate_schema(conn, current_version)?;
    } else {
        info!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get current schema version (0 if not initialized)
fn get_schema_version(conn: &Connection) -> Result<i32, ApiError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)",
        [],
    )?;

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

/// Set schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), ApiError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?)", [version])?;
    Ok(())
}

/// Create all tables
fn create_tables(conn: &Connection) -> Result<(), ApiError> {
    conn.execute_batch(BIBLE_SCHEMA)?;
    conn.execute_batch(API_KEYS_SCHEMA)?;
    conn.execute_batch(INDEXES_SCHEMA)?;
    Ok(())
}

/// Migrate schema from older version
fn migrate_schema(conn: &Connection, from_version: i32) -> Result<(), ApiError> {
    match from_version {
        // Migration steps go here as the schema evolves
        _ => {}
    }

    set_schema_version(conn, SCHEMA_VERSION)?;
    Ok(())
}

/// Books and verses schema
///
/// Reference data: loaded once at seed time, never mutated by the API.
/// The (book_id, chapter, verse) triple uniquely addresses a verse.
const BIBLE_SCHEMA: &str = r#"
-- Canonical books (66 rows once seeded)
CREATE TABLE IF NOT EXISTS bible_books (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    telugu_name TEXT NOT NULL,
    testament TEXT NOT NULL CHECK (testament IN ('old', 'new')),
    book_order INTEGER NOT NULL UNIQUE
);

-- Verse text, addressed by (book, chapter, verse)
CREATE TABLE IF NOT EXISTS bible_verses (
    id INTEGER PRIMARY KEY,
    book_id INTEGER NOT NULL,
    chapter INTEGER NOT NULL,
    verse INTEGER NOT NULL,
    text TEXT NOT NULL,
    UNIQUE (book_id, chapter, verse),
    FOREIGN KEY (book_id) REFERENCES bible_books(id) ON DELETE CASCADE
);
"#;

/// API key bookkeeping schema
///
/// Keys are tracked, not enforced: the API only bumps last_used_at.
const API_KEYS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS api_keys (
    id INTEGER PRIMARY KEY,
    key_hash TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    last_used_at TEXT
);
"#;

/// Index definitions for fast queries
const INDEXES_SCHEMA: &str = r#"
CREATE INDEX IF NOT EXISTS idx_books_order ON bible_books(book_order);
CREATE INDEX IF NOT EXISTS idx_verses_book ON bible_verses(book_id, chapter, verse);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_testament_check_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO bible_books (name, telugu_name, testament, book_order)
             VALUES ('john', 'యోహాను', 'middle', 43)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_verse_triple_is_unique() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO bible_books (id, name, telugu_name, testament, book_order)
             VALUES (1, 'john', 'యోహాను', 'new', 43)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO bible_verses (book_id, chapter, verse, text) VALUES (1, 3, 16, 'a')",
            [],
        )
        .unwrap();
        let dup = conn.execute(
            "INSERT INTO bible_verses (book_id, chapter, verse, text) VALUES (1, 3, 16, 'b')",
            [],
        );
        assert!(dup.is_err());
    }
}
