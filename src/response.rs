//! Typed response envelopes
//!
//! Every response the API produces is one of four enumerable shapes,
//! distinguished on the wire by the `success` field. Handlers return an
//! `ApiResponse`; the HTTP layer serializes it with uniform JSON and
//! CORS headers.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{header, Response, StatusCode};
use serde::Serialize;

use crate::db::books::BookRow;
use crate::db::verses::{SearchHit, VerseRow};
use crate::error::ApiError;

/// The three documented routes, advertised in the unknown-endpoint envelope
pub const AVAILABLE_ENDPOINTS: [&str; 3] = [
    "GET /bible-api/books",
    "GET /bible-api/books/{book_name}?chapter=1&verse=1",
    "GET /bible-api/search?q=దేవుడు&limit=20",
];

/// Book reference nested in a verses-by-book response
#[derive(Debug, Clone, Serialize)]
pub struct BookRef {
    pub id: i64,
    pub name: String,
    pub telugu_name: String,
}

impl From<&BookRow> for BookRef {
    fn from(book: &BookRow) -> Self {
        Self {
            id: book.id,
            name: book.name.clone(),
            telugu_name: book.telugu_name.clone(),
        }
    }
}

/// Every response shape the API can produce
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Books(BooksPayload),
    Verses(VersesPayload),
    Search(SearchPayload),
    Error(ErrorPayload),
}

/// `GET /bible-api/books` success envelope
#[derive(Debug, Serialize)]
pub struct BooksPayload {
    pub success: bool,
    pub data: Vec<BookRow>,
    pub count: usize,
}

/// `GET /bible-api/books/{name}` success envelope
#[derive(Debug, Serialize)]
pub struct VersesPayload {
    pub success: bool,
    pub book: BookRef,
    pub data: Vec<VerseRow>,
    pub count: usize,
}

/// `GET /bible-api/search` success envelope
#[derive(Debug, Serialize)]
pub struct SearchPayload {
    pub success: bool,
    pub query: String,
    pub data: Vec<SearchHit>,
    pub count: usize,
}

/// Uniform failure envelope, same shape for 400/404/500
#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_endpoints: Option<Vec<&'static str>>,
    #[serde(skip)]
    pub status: StatusCode,
}

impl ApiResponse {
    pub fn books(data: Vec<BookRow>) -> Self {
        let count = data.len();
        ApiResponse::Books(BooksPayload {
            success: true,
            data,
            count,
        })
    }

    pub fn verses(book: BookRef, data: Vec<VerseRow>) -> Self {
        let count = data.len();
        ApiResponse::Verses(VersesPayload {
            success: true,
            book,
            data,
            count,
        })
    }

    pub fn search(query: String, data: Vec<SearchHit>) -> Self {
        let count = data.len();
        ApiResponse::Search(SearchPayload {
            success: true,
            query,
            data,
            count,
        })
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        ApiResponse::Error(ErrorPayload {
            success: false,
            error: message.into(),
            available_endpoints: None,
            status,
        })
    }

    /// 404 envelope for unmapped routes, listing the documented endpoints
    pub fn endpoint_not_found() -> Self {
        ApiResponse::Error(ErrorPayload {
            success: false,
            error: "Endpoint not found".to_string(),
            available_endpoints: Some(AVAILABLE_ENDPOINTS.to_vec()),
            status: StatusCode::NOT_FOUND,
        })
    }

    /// HTTP status this envelope carries
    pub fn status(&self) -> StatusCode {
        match self {
            ApiResponse::Error(e) => e.status,
            _ => StatusCode::OK,
        }
    }

    /// Serialize into an HTTP response with JSON and CORS headers
    pub fn into_http(self) -> Response<Full<Bytes>> {
        let status = self.status();
        let json = serde_json::to_string(&self).unwrap_or_else(|_| {
            r#"{"success":false,"error":"Internal serialization error"}"#.to_string()
        });

        with_cors(Response::builder().status(status))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(json)))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Full::new(Bytes::from(
                        r#"{"success":false,"error":"Internal error"}"#,
                    )))
                    .unwrap()
            })
    }
}

impl From<ApiError> for ApiResponse {
    fn from(error: ApiError) -> Self {
        let status = match &error {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            // Timeout and store failures both surface as upstream failure
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiResponse::error(status, error.to_string())
    }
}

/// Permissive cross-origin headers, applied to every response
pub fn with_cors(builder: hyper::http::response::Builder) -> hyper::http::response::Builder {
    builder
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, "*")
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS")
}

/// Empty 200 for CORS preflight, short-circuiting all routing
pub fn preflight_response() -> Response<Full<Bytes>> {
    with_cors(Response::builder().status(StatusCode::OK))
        .body(Full::new(Bytes::new()))
        .unwrap()
}
