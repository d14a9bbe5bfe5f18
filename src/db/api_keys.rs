//! API key usage bookkeeping
//!
//! Keys are tracked, not enforced: the only mutation the API performs
//! is bumping `last_used_at` for a caller-supplied key, best-effort.

use chrono::Utc;
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::error::ApiError;

/// API key record
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyRow {
    pub id: i64,
    pub key_hash: String,
    pub name: String,
    pub created_at: String,
    pub last_used_at: Option<String>,
}

/// Bump last_used_at for the key matching `key_hash`
///
/// Returns true if a record matched. An unknown key is not an error;
/// the caller logs and moves on either way.
pub fn touch_api_key(conn: &Connection, key_hash: &str) -> Result<bool, ApiError> {
    let now = Utc::now().to_rfc3339();
    let updated = conn.execute(
        "UPDATE api_keys SET last_used_at = ? WHERE key_hash = ?",
        params![now, key_hash],
    )?;
    Ok(updated > 0)
}

/// Look up a key record by its hash
pub fn get_api_key(conn: &Connection, key_hash: &str) -> Result<Option<ApiKeyRow>, ApiError> {
    let mut stmt = conn.prepare(
        "SELECT id, key_hash, name, created_at, last_used_at FROM api_keys WHERE key_hash = ?",
    )?;

    let mut rows = stmt.query(params![key_hash])?;
    match rows.next()? {
        Some(row) => Ok(Some(ApiKeyRow {
            id: row.get(0)?,
            key_hash: row.get(1)?,
            name: row.get(2)?,
            created_at: row.get(3)?,
            last_used_at: row.get(4)?,
        })),
        None => Ok(None),
    }
}

/// Insert a key record (dashboard tooling and tests)
pub fn insert_api_key(conn: &Connection, key_hash: &str, name: &str) -> Result<i64, ApiError> {
    conn.execute(
        "INSERT INTO api_keys (key_hash, name) VALUES (?, ?)",
        params![key_hash, name],
    )?;
    Ok(conn.last_insert_rowid())
}
