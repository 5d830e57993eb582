//! Configuration module for Sumi-Drift
//!
//! Command-line values are merged over an optional TOML file, which is
//! merged over built-in defaults. The result is validated before any page
//! driver is launched.
//!
//! # Example
//!
//! ```no_run
//! use sumi_drift::config::{load_config, ConfigOverrides};
//! use std::path::Path;
//!
//! let overrides = ConfigOverrides {
//!     url: "https://example.com/".to_string(),
//!     ..Default::default()
//! };
//! let config = load_config(overrides, Some(Path::new("drift.toml"))).unwrap();
//! println!("Crawler will visit at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BrowserSection, Config, CrawlSection, CrawlerConfig, DriverConfig, DriverKind, FileConfig,
    OutputConfig, OutputSection, DEFAULT_MAX_PAGES, DEFAULT_NETWORK_TIMEOUT_SECS,
    DEFAULT_REPORT_PATH,
};

// Re-export parser functions
pub use parser::{load_config, load_file_config, resolve_config, ConfigOverrides};
pub use validation::validate_domain_pattern;
