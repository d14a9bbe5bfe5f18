//! Configuration for the verse API
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Vachanam - read-oriented HTTP API for Telugu Bible verse text
#[derive(Parser, Debug, Clone)]
#[command(name = "vachanam")]
#[command(about = "HTTP API for Telugu Bible verse lookup and search")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Path to the SQLite verse database (pre-loaded with books and verses)
    #[arg(long, env = "DB_PATH", default_value = "vachanam.db")]
    pub db_path: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "30000")]
    pub request_timeout_ms: u64,
}

impl Args {
    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_ms == 0 {
            return Err("REQUEST_TIMEOUT_MS must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args_validate() {
        let args = Args::parse_from(["vachanam"]);
        assert!(args.validate().is_ok());
        assert_eq!(args.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let args = Args::parse_from(["vachanam", "--request-timeout-ms", "0"]);
        assert!(args.validate().is_err());
    }
}
