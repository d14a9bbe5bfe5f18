//! HTTP routes for the verse API
//!
//! Route matching is enum-driven: `Route::resolve` maps a
//! (method, path) pair to a variant, and the dispatcher matches
//! exhaustively over the variants instead of chaining string
//! comparisons.

pub mod books;
pub mod health;
pub mod search;

use std::collections::HashMap;

use hyper::Method;

pub use books::{handle_book_verses, handle_books};
pub use health::handle_health;
pub use search::handle_search;

/// Fixed path prefix for the verse API routes
pub const API_PREFIX: &str = "/bible-api";

/// The recognized routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// GET /bible-api/books
    Books,
    /// GET /bible-api/books/{book_name}
    BookVerses(String),
    /// GET /bible-api/search
    Search,
    /// GET /health - liveness probe
    Health,
    /// Anything else - structured 404
    Unknown,
}

impl Route {
    /// Map a method and path to a route
    ///
    /// Only GET is recognized; any other method on any path resolves to
    /// `Unknown`. Preflight is short-circuited before resolution.
    pub fn resolve(method: &Method, path: &str) -> Route {
        if method != Method::GET {
            return Route::Unknown;
        }

        match path {
            "/health" | "/healthz" => return Route::Health,
            _ => {}
        }

        let Some(rest) = path.strip_prefix(API_PREFIX) else {
            return Route::Unknown;
        };

        match rest {
            "/books" => Route::Books,
            "/search" => Route::Search,
            _ => match rest.strip_prefix("/books/") {
                // Exactly one non-empty path segment names a book
                Some(name) if !name.is_empty() && !name.contains('/') => {
                    Route::BookVerses(name.to_string())
                }
                _ => Route::Unknown,
            },
        }
    }
}

/// Parse a query string into a key-value map, percent-decoding values
///
/// Decoding matters here: Telugu search input arrives percent-encoded.
pub fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    match query {
        Some(q) if !q.is_empty() => url::form_urlencoded::parse(q.as_bytes())
            .into_owned()
            .collect(),
        _ => HashMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_books() {
        assert_eq!(Route::resolve(&Method::GET, "/bible-api/books"), Route::Books);
    }

    #[test]
    fn test_resolve_book_verses() {
        assert_eq!(
            Route::resolve(&Method::GET, "/bible-api/books/john"),
            Route::BookVerses("john".to_string())
        );
    }

    #[test]
    fn test_resolve_search() {
        assert_eq!(Route::resolve(&Method::GET, "/bible-api/search"), Route::Search);
    }

    #[test]
    fn test_resolve_health() {
        assert_eq!(Route::resolve(&Method::GET, "/health"), Route::Health);
        assert_eq!(Route::resolve(&Method::GET, "/healthz"), Route::Health);
    }

    #[test]
    fn test_resolve_unknown_paths() {
        assert_eq!(Route::resolve(&Method::GET, "/unknown"), Route::Unknown);
        assert_eq!(Route::resolve(&Method::GET, "/bible-api"), Route::Unknown);
        assert_eq!(Route::resolve(&Method::GET, "/bible-api/books/"), Route::Unknown);
        assert_eq!(
            Route::resolve(&Method::GET, "/bible-api/books/john/extra"),
            Route::Unknown
        );
    }

    #[test]
    fn test_resolve_non_get_is_unknown() {
        assert_eq!(Route::resolve(&Method::POST, "/bible-api/books"), Route::Unknown);
        assert_eq!(Route::resolve(&Method::DELETE, "/bible-api/search"), Route::Unknown);
    }

    #[test]
    fn test_parse_query_basic() {
        let params = parse_query(Some("chapter=3&verse=16"));
        assert_eq!(params.get("chapter"), Some(&"3".to_string()));
        assert_eq!(params.get("verse"), Some(&"16".to_string()));
    }

    #[test]
    fn test_parse_query_percent_decodes() {
        // "దేవుడు" percent-encoded
        let params = parse_query(Some(
            "q=%E0%B0%A6%E0%B1%87%E0%B0%B5%E0%B1%81%E0%B0%A1%E0%B1%81&limit=5",
        ));
        assert_eq!(params.get("q"), Some(&"దేవుడు".to_string()));
        assert_eq!(params.get("limit"), Some(&"5".to_string()));
    }

    #[test]
    fn test_parse_query_empty() {
        assert!(parse_query(None).is_empty());
        assert!(parse_query(Some("")).is_empty());
    }
}
