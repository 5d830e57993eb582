//! Crawler module for the scoped random walk
//!
//! This module contains the core crawling logic, including:
//! - The frontier of discovered and visited links
//! - The request ledger fed by the page driver's response events
//! - Anchor extraction from rendered HTML
//! - Overall crawl coordination

mod coordinator;
mod frontier;
mod ledger;
mod parser;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use frontier::Frontier;
pub use ledger::{spawn_collector, RequestLedger};
pub use parser::extract_anchor_hrefs;

use crate::config::Config;
use crate::driver::DefaultLauncher;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Launch the configured page driver
/// 2. Walk the site from the seed URL, one random unvisited link at a time
/// 3. Collect every response the driver observes
/// 4. Release the driver and write the HTML report
///
/// # Arguments
///
/// * `config` - The validated crawl configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl completed and the report was written
/// * `Err(DriftError)` - The driver failed to launch or the report could not be written
pub async fn crawl(config: Config) -> crate::Result<CrawlOutcome> {
    let launcher = DefaultLauncher::new(config.browser.driver);
    run_crawl(config, &launcher).await
}
