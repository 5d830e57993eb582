use crate::driver::DriverOptions;
use crate::url::{Link, ScopeSpec};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default navigation budget
pub const DEFAULT_MAX_PAGES: usize = 25;

/// Default per-navigation timeout in seconds
pub const DEFAULT_NETWORK_TIMEOUT_SECS: f64 = 10.0;

/// Default report destination
pub const DEFAULT_REPORT_PATH: &str = "report.html";

/// Configuration file layout
///
/// Every key is optional; missing values fall back to command-line flags
/// and then to built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub crawl: CrawlSection,

    #[serde(default)]
    pub browser: BrowserSection,

    #[serde(default)]
    pub output: OutputSection,
}

/// `[crawl]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CrawlSection {
    /// Domain patterns; derived from the seed URL when absent
    pub domains: Option<Vec<String>>,

    pub max_pages: Option<usize>,

    /// Inter-page delay in seconds
    pub delay: Option<f64>,

    /// Per-navigation timeout in seconds
    pub network_timeout: Option<f64>,

    pub human: Option<bool>,

    /// Frontier RNG seed
    pub seed: Option<u64>,
}

/// `[browser]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BrowserSection {
    pub driver: Option<DriverKind>,
    pub show_browser: Option<bool>,
    pub chrome_path: Option<PathBuf>,
}

/// `[output]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputSection {
    pub report_path: Option<PathBuf>,
}

/// Which page driver backs the crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// Render pages in Chromium
    #[default]
    Chromium,

    /// Fetch documents over plain HTTP, without a browser
    Http,
}

/// Fully resolved and validated crawl configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the walk starts
    pub seed: Link,

    /// Hosts the walk may visit
    pub scope: ScopeSpec,

    pub crawler: CrawlerConfig,
    pub browser: DriverConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Options the page driver is launched with
    pub fn driver_options(&self) -> DriverOptions {
        DriverOptions {
            headless: !self.browser.show_browser,
            chrome_path: self.browser.chrome_path.clone(),
            navigation_timeout: self.crawler.network_timeout,
        }
    }
}

/// Crawl loop behavior
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Maximum number of navigations
    pub max_pages: usize,

    /// Sleep after each page
    pub delay: Duration,

    /// Upper bound for a single navigation
    pub network_timeout: Duration,

    /// Run the human-behavior simulation before extracting anchors
    pub human: bool,

    /// Seed for the frontier RNG; entropy-seeded when None
    pub rng_seed: Option<u64>,
}

/// Page driver selection
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub driver: DriverKind,

    /// Show the browser window instead of running headless
    pub show_browser: bool,

    pub chrome_path: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Path of the HTML report
    pub report_path: PathBuf,
}
