//! Vachanam daemon
//!
//! Serves the Telugu Bible verse API over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! # Start with defaults (0.0.0.0:8080, ./vachanam.db)
//! vachanam
//!
//! # Custom listen address and database path
//! vachanam --listen 127.0.0.1:9000 --db-path /data/vachanam.db
//! ```
//!
//! ## HTTP API
//!
//! - `GET /bible-api/books` - List all books in canonical order
//! - `GET /bible-api/books/{book_name}?chapter=1&verse=1` - Verses for a book
//! - `GET /bible-api/search?q=దేవుడు&limit=20` - Text search over verses
//! - `GET /health` - Liveness probe

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vachanam::{Args, HttpServer, VerseDb};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("vachanam={}", args.log_level).parse()?),
        )
        .init();

    args.validate()?;

    let db = Arc::new(VerseDb::open(&args.db_path)?);
    let stats = db.stats()?;
    info!(
        books = stats.book_count,
        verses = stats.verse_count,
        api_keys = stats.api_key_count,
        "Verse store opened"
    );

    let server = Arc::new(HttpServer::new(db, args.listen, args.request_timeout()));
    server.run().await?;

    Ok(())
}
