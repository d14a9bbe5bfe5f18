//! Verse query operations
//!
//! Read-only access to verse text: filtered listing by book and text
//! search joined with the owning book.

use rusqlite::{params, Connection};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;

/// Verse row scoped to a known book
#[derive(Debug, Clone, Serialize)]
pub struct VerseRow {
    pub chapter: i64,
    pub verse: i64,
    pub text: String,
}

/// Book reference nested in search results
#[derive(Debug, Clone, Serialize)]
pub struct SearchBookRef {
    pub name: String,
    pub telugu_name: String,
}

/// Search result: a verse with its owning book
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub chapter: i64,
    pub verse: i64,
    pub text: String,
    pub book: SearchBookRef,
}

/// Optional narrowing filters for a verses-by-book query
#[derive(Debug, Clone, Copy, Default)]
pub struct VerseFilter {
    pub chapter: Option<i64>,
    pub verse: Option<i64>,
}

/// List verses for a book, optionally narrowed by chapter and verse
///
/// Results are sorted by (chapter, verse) ascending. A verse filter
/// without a chapter filter is ignored; callers preserve that quirk
/// rather than erroring.
pub fn list_verses(
    conn: &Connection,
    book_id: i64,
    filter: &VerseFilter,
) -> Result<Vec<VerseRow>, ApiError> {
    let mut sql = String::from(
        "SELECT chapter, verse, text FROM bible_verses WHERE book_id = ?",
    );
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(book_id)];

    if let Some(chapter) = filter.chapter {
        sql.push_str(" AND chapter = ?");
        params.push(Box::new(chapter));

        // verse only narrows when chapter is also present
        if let Some(verse) = filter.verse {
            sql.push_str(" AND verse = ?");
            params.push(Box::new(verse));
        }
    }

    sql.push_str(" ORDER BY chapter ASC, verse ASC");

    debug!("Executing query: {}", sql);

    let mut stmt = conn.prepare(&sql)?;
    let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

    let rows = stmt.query_map(param_refs.as_slice(), |row| {
        Ok(VerseRow {
            chapter: row.get(0)?,
            verse: row.get(1)?,
            text: row.get(2)?,
        })
    })?;

    let mut verses = Vec::new();
    for row in rows {
        verses.push(row?);
    }

    Ok(verses)
}

/// Text search over verse text, joined with the owning book
///
/// Containment match (SQL LIKE) over the text column, capped at
/// `limit`. Ordering is deterministic: canonical book order, then
/// chapter, then verse.
pub fn search_verses(
    conn: &Connection,
    query: &str,
    limit: i64,
) -> Result<Vec<SearchHit>, ApiError> {
    let pattern = format!("%{}%", query);

    let mut stmt = conn.prepare(
        "SELECT v.chapter, v.verse, v.text, b.name, b.telugu_name
         FROM bible_verses v
         INNER JOIN bible_books b ON v.book_id = b.id
         WHERE v.text LIKE ?
         ORDER BY b.book_order ASC, v.chapter ASC, v.verse ASC
         LIMIT ?",
    )?;

    let rows = stmt.query_map(params![pattern, limit], |row| {
        Ok(SearchHit {
            chapter: row.get(0)?,
            verse: row.get(1)?,
            text: row.get(2)?,
            book: SearchBookRef {
                name: row.get(3)?,
                telugu_name: row.get(4)?,
            },
        })
    })?;

    let mut hits = Vec::new();
    for row in rows {
        hits.push(row?);
    }

    Ok(hits)
}

/// Insert a verse (seed tooling and tests; the API never writes verses)
pub fn insert_verse(
    conn: &Connection,
    book_id: i64,
    chapter: i64,
    verse: i64,
    text: &str,
) -> Result<i64, ApiError> {
    conn.execute(
        "INSERT INTO bible_verses (book_id, chapter, verse, text) VALUES (?, ?, ?, ?)",
        params![book_id, chapter, verse, text],
    )?;
    Ok(conn.last_insert_rowid())
}
