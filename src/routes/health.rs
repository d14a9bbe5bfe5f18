//! Liveness probe
//!
//! Returns 200 with store counts while the service is running. The
//! dashboard polls this; it is not part of the documented verse API
//! surface.

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{header, Response, StatusCode};
use serde::Serialize;

use crate::db::VerseDb;
use crate::response::with_cors;

/// Health response body
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    books: u64,
    verses: u64,
    api_keys: u64,
}

/// Handle `GET /health`
pub fn handle_health(db: &Arc<VerseDb>) -> Response<Full<Bytes>> {
    let (status, body) = match db.stats() {
        Ok(stats) => (
            StatusCode::OK,
            HealthResponse {
                status: "ok",
                version: env!("CARGO_PKG_VERSION"),
                books: stats.book_count,
                verses: stats.verse_count,
                api_keys: stats.api_key_count,
            },
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            HealthResponse {
                status: "degraded",
                version: env!("CARGO_PKG_VERSION"),
                books: 0,
                verses: 0,
                api_keys: 0,
            },
        ),
    };

    let json = serde_json::to_string(&body).unwrap_or_else(|_| r#"{"status":"ok"}"#.to_string());

    with_cors(Response::builder().status(status))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap()
}
