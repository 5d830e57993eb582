//! Output module for crawl reports
//!
//! This module handles:
//! - Collecting the crawl results into a [`CrawlReport`]
//! - Rendering the report as a self-contained HTML document
//! - Printing crawl statistics to the console

mod html;
pub mod stats;

pub use html::{escape_html, render_html, write_html_report};
pub use stats::{format_statistics, print_statistics};

use crate::url::Link;
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write report to {path}: {message}")]
    Write { path: String, message: String },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Everything a finished crawl collected
///
/// The containers are kept as the crawl produced them; the accessors
/// return the sorted listings the report shows.
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// The seed URL the crawl started from
    pub target_url: String,

    /// Every in-scope link found on any visited page
    pub discovered: BTreeSet<Link>,

    /// Pages navigated to, in visit order
    pub visited: Vec<Link>,

    /// In-scope request URL -> last observed status
    pub requests: HashMap<String, u16>,

    /// Every host seen in a response
    pub domains: HashSet<String>,
}

impl CrawlReport {
    /// Number of responses with status >= 400
    pub fn error_count(&self) -> usize {
        self.requests.values().filter(|&&status| status >= 400).count()
    }

    /// Number of responses with status < 400
    pub fn ok_count(&self) -> usize {
        self.requests.values().filter(|&&status| status < 400).count()
    }

    /// Requests sorted by status descending, then URL ascending
    pub fn sorted_requests(&self) -> Vec<(&str, u16)> {
        let mut requests: Vec<(&str, u16)> = self
            .requests
            .iter()
            .map(|(url, status)| (url.as_str(), *status))
            .collect();
        requests.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        requests
    }

    /// Visited pages in lexicographic order
    pub fn sorted_visited(&self) -> Vec<&str> {
        let mut visited: Vec<&str> = self.visited.iter().map(Link::as_str).collect();
        visited.sort_unstable();
        visited
    }

    /// Discovered links in lexicographic order
    pub fn sorted_discovered(&self) -> Vec<&str> {
        let mut discovered: Vec<&str> = self.discovered.iter().map(Link::as_str).collect();
        discovered.sort_unstable();
        discovered
    }

    /// Contacted hosts in lexicographic order
    pub fn sorted_domains(&self) -> Vec<&str> {
        let mut domains: Vec<&str> = self.domains.iter().map(String::as_str).collect();
        domains.sort_unstable();
        domains
    }
}
