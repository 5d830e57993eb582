//! Sumi-Drift: a scoped random-walk site explorer
//!
//! This crate drives a page driver (a real browser or a plain HTTP client)
//! through a bounded random walk over a website, staying inside a set of
//! permitted domains, and records every page visited, every link discovered
//! and every network response observed before rendering an HTML report.

pub mod config;
pub mod crawler;
pub mod driver;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Drift operations
///
/// Only fatal conditions surface here. Per-page navigation failures,
/// malformed anchors and unparseable response events are handled inside
/// the crawl loop and never reach the caller.
#[derive(Debug, Error)]
pub enum DriftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to launch page driver: {0}")]
    Launch(#[from] driver::DriverError),

    #[error("Report error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Request ledger collector failed: {0}")]
    Ledger(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Sumi-Drift operations
pub type Result<T> = std::result::Result<T, DriftError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlOutcome};
pub use state::CrawlPhase;
pub use url::{accept, is_in_scope, normalize, should_skip, Link, ScopeSpec};
