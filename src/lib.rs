//! Vachanam - read-oriented HTTP API for Telugu Bible verse text
//!
//! A stateless verse query service: books listing, verses-by-book
//! lookup with optional chapter/verse filters, and text search, backed
//! by a pre-loaded SQLite store. Caller-supplied API keys get their
//! last-used timestamp bumped best-effort; nothing is enforced.
//!
//! ## Services
//!
//! - **Books**: canonical book listing in testament order
//! - **Verses**: filtered verse lookup by book/chapter/verse
//! - **Search**: text containment search joined with owning books
//! - **Usage tracking**: detached last-used bookkeeping per API key

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod response;
pub mod routes;

pub use config::Args;
pub use db::VerseDb;
pub use error::ApiError;
pub use http::HttpServer;
pub use response::ApiResponse;
