//! Book lookup operations
//!
//! Books are immutable reference data: the 66 canonical books with
//! lowercase name slugs, Telugu display names, testament classification
//! and a strict canonical ordering.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Testament classification, partitioning the books into two sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    pub fn as_str(&self) -> &'static str {
        match self {
            Testament::Old => "old",
            Testament::New => "new",
        }
    }

    fn parse(s: &str) -> Result<Self, ApiError> {
        match s {
            "old" => Ok(Testament::Old),
            "new" => Ok(Testament::New),
            other => Err(ApiError::Internal(format!(
                "Invalid testament value in store: {}",
                other
            ))),
        }
    }
}

/// Book row from the store
#[derive(Debug, Clone, Serialize)]
pub struct BookRow {
    pub id: i64,
    /// Canonical lowercase slug, e.g. "john"
    pub name: String,
    /// Telugu display name
    pub telugu_name: String,
    pub testament: Testament,
    pub book_order: i64,
}

impl BookRow {
    fn from_row(row: &Row) -> Result<Self, ApiError> {
        let testament: String = row.get("testament")?;
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            telugu_name: row.get("telugu_name")?,
            testament: Testament::parse(&testament)?,
            book_order: row.get("book_order")?,
        })
    }
}

/// Input for seeding a book
#[derive(Debug, Clone, Deserialize)]
pub struct NewBook {
    pub name: String,
    pub telugu_name: String,
    pub testament: Testament,
    pub book_order: i64,
}

/// List all books in canonical order
pub fn list_books(conn: &Connection) -> Result<Vec<BookRow>, ApiError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, telugu_name, testament, book_order
         FROM bible_books ORDER BY book_order ASC",
    )?;

    let mut rows = stmt.query([])?;
    let mut books = Vec::new();
    while let Some(row) = rows.next()? {
        books.push(BookRow::from_row(row)?);
    }

    Ok(books)
}

/// Exact-match lookup of a book by its name slug
///
/// The name column is a unique key, so this returns at most one record.
/// Matching is case-sensitive: "John" does not resolve "john".
pub fn get_book_by_name(conn: &Connection, name: &str) -> Result<Option<BookRow>, ApiError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, telugu_name, testament, book_order
         FROM bible_books WHERE name = ?",
    )?;

    let mut rows = stmt.query(params![name])?;
    match rows.next()? {
        Some(row) => Ok(Some(BookRow::from_row(row)?)),
        None => Ok(None),
    }
}

/// Insert a book (seed tooling and tests; the API never writes books)
pub fn insert_book(conn: &Connection, input: &NewBook) -> Result<i64, ApiError> {
    conn.execute(
        "INSERT INTO bible_books (name, telugu_name, testament, book_order)
         VALUES (?, ?, ?, ?)",
        params![
            input.name,
            input.telugu_name,
            input.testament.as_str(),
            input.book_order
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::VerseDb;

    fn seed_books(db: &VerseDb) {
        db.with_conn(|conn| {
            insert_book(
                conn,
                &NewBook {
                    name: "john".to_string(),
                    telugu_name: "యోహాను".to_string(),
                    testament: Testament::New,
                    book_order: 43,
                },
            )?;
            insert_book(
                conn,
                &NewBook {
                    name: "genesis".to_string(),
                    telugu_name: "ఆదికాండము".to_string(),
                    testament: Testament::Old,
                    book_order: 1,
                },
            )?;
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_list_books_ordered_by_book_order() {
        let db = VerseDb::open_in_memory().unwrap();
        seed_books(&db);

        let books = db.with_conn(list_books).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].name, "genesis");
        assert_eq!(books[0].testament, Testament::Old);
        assert_eq!(books[1].name, "john");
        assert_eq!(books[1].book_order, 43);
    }

    #[test]
    fn test_get_book_by_name_exact_match() {
        let db = VerseDb::open_in_memory().unwrap();
        seed_books(&db);

        let book = db
            .with_conn(|conn| get_book_by_name(conn, "john"))
            .unwrap()
            .unwrap();
        assert_eq!(book.telugu_name, "యోహాను");
    }

    #[test]
    fn test_get_book_by_name_is_case_sensitive() {
        let db = VerseDb::open_in_memory().unwrap();
        seed_books(&db);

        let book = db.with_conn(|conn| get_book_by_name(conn, "John")).unwrap();
        assert!(book.is_none());
    }

    #[test]
    fn test_get_book_by_name_missing() {
        let db = VerseDb::open_in_memory().unwrap();
        seed_books(&db);

        let book = db
            .with_conn(|conn| get_book_by_name(conn, "nosuchbook"))
            .unwrap();
        assert!(book.is_none());
    }

    #[test]
    fn test_testament_serializes_lowercase() {
        let json = serde_json::to_string(&Testament::New).unwrap();
        assert_eq!(json, r#""new""#);
    }
}
