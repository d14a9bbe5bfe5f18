//! Full-text search handler

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::db::{verses, VerseDb};
use crate::error::ApiError;
use crate::response::ApiResponse;

/// Default result cap when `limit` is absent or unparseable
const DEFAULT_LIMIT: i64 = 20;

/// Upper bound on `limit`
const MAX_LIMIT: i64 = 200;

/// Handle `GET /bible-api/search?q=...&limit=N`
///
/// `q` is required and non-empty; `limit` defaults to 20 and is clamped
/// to 1..=200.
pub fn handle_search(db: &Arc<VerseDb>, params: &HashMap<String, String>) -> ApiResponse {
    let query = match params.get("q").map(|q| q.trim()) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => return ApiError::InvalidInput("Search query required".to_string()).into(),
    };

    let limit = params
        .get("limit")
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT);

    debug!(query = %query, limit = limit, "Searching verses");

    match db.with_conn(|conn| verses::search_verses(conn, &query, limit)) {
        Ok(data) => ApiResponse::search(query, data),
        Err(e) => e.into(),
    }
}
