//! HTTP server implementation
//!
//! hyper http1 accept loop with one spawned task per connection.
//! Requests are resolved to a `Route`, dispatched on the blocking pool
//! (SQLite work is synchronous), and bounded by a request timeout.
//! Timeout exhaustion surfaces as the store-unreachable 500 envelope.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::db::{api_keys, VerseDb};
use crate::error::ApiError;
use crate::response::{preflight_response, ApiResponse};
use crate::routes::{self, Route};

/// HTTP server state
///
/// Holds the injected store handle; no global connection state exists.
pub struct HttpServer {
    db: Arc<VerseDb>,
    bind_addr: SocketAddr,
    request_timeout: Duration,
}

impl HttpServer {
    /// Create a new HTTP server over an already-opened store
    pub fn new(db: Arc<VerseDb>, bind_addr: SocketAddr, request_timeout: Duration) -> Self {
        Self {
            db,
            bind_addr,
            request_timeout,
        }
    }

    /// Run the HTTP server
    pub async fn run(self: Arc<Self>) -> Result<(), ApiError> {
        let listener = TcpListener::bind(self.bind_addr).await?;
        info!(addr = %self.bind_addr, "Verse API listening");

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let server = self.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req| {
                    let server = server.clone();
                    async move { server.handle_request(req).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    warn!(addr = %remote_addr, error = %err, "Connection error");
                }
            });
        }
    }

    /// Route incoming HTTP requests
    async fn handle_request(
        &self,
        req: Request<Incoming>,
    ) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let query = req.uri().query().map(|q| q.to_string());

        debug!(method = %method, path = %path, "Incoming request");

        let header_key = req
            .headers()
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        Ok(self
            .handle(&method, &path, query.as_deref(), header_key)
            .await)
    }

    /// Handle one request from its extracted parts
    ///
    /// Split out from `handle_request` so tests can drive the full
    /// dispatch path without a TCP connection.
    pub async fn handle(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
        header_key: Option<String>,
    ) -> Response<Full<Bytes>> {
        // Preflight short-circuits all routing
        if method == Method::OPTIONS {
            return preflight_response();
        }

        let params = routes::parse_query(query);

        // Best-effort usage bookkeeping, never awaited by this path.
        // Header takes precedence over the `key` query parameter.
        let api_key = header_key.or_else(|| params.get("key").cloned());
        if let Some(key) = api_key {
            self.spawn_usage_bump(key);
        }

        let route = Route::resolve(method, path);

        // Liveness probe bypasses the timeout wrapper
        if route == Route::Health {
            return routes::handle_health(&self.db);
        }

        let db = Arc::clone(&self.db);
        let work = tokio::task::spawn_blocking(move || match route {
            Route::Books => routes::handle_books(&db),
            Route::BookVerses(name) => routes::handle_book_verses(&db, &name, &params),
            Route::Search => routes::handle_search(&db, &params),
            Route::Health => unreachable!("handled above"),
            Route::Unknown => ApiResponse::endpoint_not_found(),
        });

        let response = match tokio::time::timeout(self.request_timeout, work).await {
            Ok(Ok(response)) => response,
            Ok(Err(join_err)) => {
                warn!(error = %join_err, "Handler task failed");
                ApiError::Internal("Handler task failed".to_string()).into()
            }
            Err(_) => {
                warn!(path = %path, timeout_ms = self.request_timeout.as_millis() as u64,
                    "Request timed out");
                ApiError::Timeout("store did not respond in time".to_string()).into()
            }
        };

        response.into_http()
    }

    /// Record "key last used now", detached from the response path
    ///
    /// Failures are logged and swallowed; the primary request must not
    /// observe them.
    fn spawn_usage_bump(&self, key: String) {
        let db = Arc::clone(&self.db);
        tokio::spawn(async move {
            let result =
                tokio::task::spawn_blocking(move || {
                    db.with_conn(|conn| api_keys::touch_api_key(conn, &key))
                })
                .await;

            match result {
                Ok(Ok(true)) => debug!("Recorded API key usage"),
                Ok(Ok(false)) => debug!("API key not registered, usage not recorded"),
                Ok(Err(e)) => warn!(error = %e, "Failed to record API key usage"),
                Err(e) => warn!(error = %e, "Usage bump task failed"),
            }
        });
    }
}
