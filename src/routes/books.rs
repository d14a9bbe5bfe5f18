//! Books listing and verses-by-book handlers

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::db::verses::VerseFilter;
use crate::db::{books, verses, VerseDb};
use crate::error::ApiError;
use crate::response::{ApiResponse, BookRef};

/// Handle `GET /bible-api/books`
///
/// All books in canonical order, no parameters.
pub fn handle_books(db: &Arc<VerseDb>) -> ApiResponse {
    match db.with_conn(books::list_books) {
        Ok(data) => ApiResponse::books(data),
        Err(e) => e.into(),
    }
}

/// Handle `GET /bible-api/books/{book_name}?chapter=N&verse=M`
///
/// Resolves the book by exact name, then lists its verses narrowed by
/// the optional filters. Two documented quirks are preserved:
/// a `verse` filter without `chapter` is silently ignored, and
/// non-numeric filter values are treated as absent.
pub fn handle_book_verses(
    db: &Arc<VerseDb>,
    book_name: &str,
    params: &HashMap<String, String>,
) -> ApiResponse {
    let book = match db.with_conn(|conn| books::get_book_by_name(conn, book_name)) {
        Ok(Some(book)) => book,
        Ok(None) => {
            debug!(book = %book_name, "Book not found");
            return ApiError::NotFound("Book not found".to_string()).into();
        }
        Err(e) => return e.into(),
    };

    let filter = VerseFilter {
        chapter: parse_numeric(params, "chapter"),
        verse: parse_numeric(params, "verse"),
    };

    match db.with_conn(|conn| verses::list_verses(conn, book.id, &filter)) {
        Ok(data) => ApiResponse::verses(BookRef::from(&book), data),
        Err(e) => e.into(),
    }
}

/// Parse an optional numeric query parameter, treating garbage as absent
fn parse_numeric(params: &HashMap<String, String>, key: &str) -> Option<i64> {
    params.get(key).and_then(|v| v.parse::<i64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::books::{insert_book, NewBook, Testament};
    use crate::db::verses::insert_verse;
    use hyper::StatusCode;

    fn seeded_db() -> Arc<VerseDb> {
        let db = VerseDb::open_in_memory().unwrap();
        db.with_conn(|conn| {
            let john = insert_book(
                conn,
                &NewBook {
                    name: "john".to_string(),
                    telugu_name: "యోహాను".to_string(),
                    testament: Testament::New,
                    book_order: 43,
                },
            )?;
            insert_verse(conn, john, 3, 16, "దేవుడు లోకమును ఎంతో ప్రేమించెను")?;
            insert_verse(conn, john, 3, 17, "రెండవ వచనము")?;
            insert_verse(conn, john, 1, 1, "ఆదియందు వాక్యముండెను")?;
            Ok(())
        })
        .unwrap();
        Arc::new(db)
    }

    #[test]
    fn test_handle_books_lists_all() {
        let db = seeded_db();
        let resp = handle_books(&db);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 1);
        assert_eq!(json["data"][0]["name"], "john");
        assert_eq!(json["data"][0]["testament"], "new");
    }

    #[test]
    fn test_handle_book_verses_unfiltered_sorted() {
        let db = seeded_db();
        let resp = handle_book_verses(&db, "john", &HashMap::new());

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["book"]["name"], "john");
        assert_eq!(json["book"]["telugu_name"], "యోహాను");
        assert_eq!(json["count"], 3);
        assert_eq!(json["data"][0]["chapter"], 1);
        assert_eq!(json["data"][1]["verse"], 16);
    }

    #[test]
    fn test_handle_book_verses_chapter_and_verse() {
        let db = seeded_db();
        let params = HashMap::from([
            ("chapter".to_string(), "3".to_string()),
            ("verse".to_string(), "16".to_string()),
        ]);
        let resp = handle_book_verses(&db, "john", &params);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["data"][0]["text"], "దేవుడు లోకమును ఎంతో ప్రేమించెను");
    }

    #[test]
    fn test_handle_book_verses_verse_without_chapter_ignored() {
        let db = seeded_db();
        let params = HashMap::from([("verse".to_string(), "16".to_string())]);
        let resp = handle_book_verses(&db, "john", &params);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn test_handle_book_verses_non_numeric_chapter_ignored() {
        let db = seeded_db();
        let params = HashMap::from([("chapter".to_string(), "three".to_string())]);
        let resp = handle_book_verses(&db, "john", &params);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn test_handle_book_verses_unknown_book() {
        let db = seeded_db();
        let resp = handle_book_verses(&db, "nosuchbook", &HashMap::new());

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Book not found");
    }
}
