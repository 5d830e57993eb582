//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the navigation loop that ties the crawl together:
//! - Launching the page driver and wiring its responses to the ledger
//! - Visiting one page at a time, up to the page budget
//! - Classifying discovered anchors and feeding the frontier
//! - Releasing the driver and writing the report

use crate::config::Config;
use crate::crawler::frontier::Frontier;
use crate::crawler::ledger::spawn_collector;
use crate::driver::{DriverLauncher, PageDriver, ResponseObserver};
use crate::output::{write_html_report, CrawlReport};
use crate::state::CrawlPhase;
use crate::url::{accept, Link};
use crate::DriftError;
use std::path::PathBuf;
use std::time::Instant;
use url::Url;

/// Result of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Why the navigation loop stopped: `Exhausted` or `PageBudgetReached`
    pub stopped_by: CrawlPhase,

    /// Navigations attempted, failed ones included
    pub pages_navigated: usize,

    /// Navigations that timed out or failed
    pub navigation_failures: usize,

    /// Everything the crawl collected
    pub report: CrawlReport,

    /// Where the HTML report was written
    pub report_path: PathBuf,
}

/// Loop counters
#[derive(Debug, Default)]
struct WalkStats {
    pages: usize,
    failures: usize,
}

/// Main crawler coordinator structure
///
/// Owns the frontier for the duration of one crawl. The request ledger
/// lives in its own collector task and is handed back once the driver is
/// closed.
pub struct Coordinator {
    config: Config,
    frontier: Frontier,
    phase: CrawlPhase,
}

impl Coordinator {
    /// Creates a coordinator in the `Idle` phase
    pub fn new(config: Config) -> Self {
        let frontier = Frontier::new(config.crawler.rng_seed);
        Self {
            config,
            frontier,
            phase: CrawlPhase::Idle,
        }
    }

    /// Returns the current phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    fn transition(&mut self, next: CrawlPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "invalid crawl phase transition {} -> {}",
            self.phase,
            next
        );
        tracing::debug!("Crawl phase {} -> {}", self.phase, next);
        self.phase = next;
    }

    /// Runs the crawl to completion
    ///
    /// Failing to launch the page driver is the only fatal condition once
    /// the configuration is valid. Per-page navigation and extraction
    /// failures are logged and the walk continues.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - The walk finished and the report was written
    /// * `Err(DriftError)` - The driver could not be launched, or the
    ///   report could not be written
    pub async fn run(mut self, launcher: &dyn DriverLauncher) -> crate::Result<CrawlOutcome> {
        let start_time = Instant::now();
        tracing::info!(
            "Starting crawl of {} (scope: {}, max pages: {})",
            self.config.seed,
            self.config.scope.patterns().join(", "),
            self.config.crawler.max_pages
        );

        let (observer, events) = ResponseObserver::channel();
        let collector = spawn_collector(self.config.scope.clone(), events);

        let options = self.config.driver_options();
        let mut driver = match launcher.launch(&options, observer).await {
            Ok(driver) => driver,
            Err(e) => {
                collector.abort();
                return Err(DriftError::Launch(e));
            }
        };

        self.transition(CrawlPhase::Running);
        let (stopped_by, stats) = self.walk(driver.as_mut()).await;
        self.transition(stopped_by);

        // Teardown runs in `Done`
        self.transition(CrawlPhase::Done);

        // Closing the driver drops its observer, which ends the collector
        if let Err(e) = driver.close().await {
            tracing::warn!("Failed to close page driver cleanly: {}", e);
        }

        let ledger = collector
            .await
            .map_err(|e| DriftError::Ledger(e.to_string()))?;
        let (requests, domains) = ledger.into_parts();
        let (discovered, visited) = self.frontier.into_parts();

        let report = CrawlReport {
            target_url: self.config.seed.to_string(),
            discovered,
            visited,
            requests,
            domains,
        };

        let report_path = self.config.output.report_path;
        write_html_report(&report, &report_path)?;

        tracing::info!(
            "Crawl completed ({}): {} pages visited, {} links discovered in {:?}",
            stopped_by,
            stats.pages,
            report.discovered.len(),
            start_time.elapsed()
        );
        tracing::info!("Report written to {}", report_path.display());

        Ok(CrawlOutcome {
            stopped_by,
            pages_navigated: stats.pages,
            navigation_failures: stats.failures,
            report,
            report_path,
        })
    }

    /// The navigation loop
    ///
    /// Returns the phase that ended it along with the loop counters.
    async fn walk(&mut self, driver: &mut dyn PageDriver) -> (CrawlPhase, WalkStats) {
        let max_pages = self.config.crawler.max_pages;
        let delay = self.config.crawler.delay;
        let mut stats = WalkStats::default();
        let mut target = self.config.seed.clone();

        loop {
            if stats.pages >= max_pages {
                tracing::info!("Page budget of {} reached", max_pages);
                return (CrawlPhase::PageBudgetReached, stats);
            }

            self.frontier.mark_visited(&target);
            stats.pages += 1;

            let (accepted, new) = match self.visit(driver, &target).await {
                Some(links) => self.record_links(links),
                None => {
                    stats.failures += 1;
                    (0, 0)
                }
            };

            tracing::info!(
                "[{}/{}] {} ({} links, {} new, {} unvisited)",
                stats.pages,
                max_pages,
                target,
                accepted,
                new,
                self.frontier.unvisited_count()
            );

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match self.frontier.next_unvisited() {
                Some(next) => target = next,
                None => {
                    tracing::info!("Frontier exhausted after {} pages", stats.pages);
                    return (CrawlPhase::Exhausted, stats);
                }
            }
        }
    }

    /// Navigates to one page and returns its accepted links
    ///
    /// Returns None if navigation failed; the page then contributes nothing.
    async fn visit(&self, driver: &mut dyn PageDriver, target: &Link) -> Option<Vec<Link>> {
        let timeout = self.config.crawler.network_timeout;

        if let Err(e) = driver.navigate(target.as_str(), timeout).await {
            tracing::warn!("{}", e);
            return None;
        }

        if self.config.crawler.human {
            if let Err(e) = driver.simulate_human().await {
                tracing::warn!("Human simulation failed on {}: {}", target, e);
            }
        }

        // Resolve against where the page actually ended up, after redirects
        let base = driver
            .current_url()
            .await
            .and_then(|current| Url::parse(&current).ok())
            .unwrap_or_else(|| target.as_url().clone());

        let hrefs = match driver.anchor_hrefs().await {
            Ok(hrefs) => hrefs,
            Err(e) => {
                tracing::warn!("Failed to extract anchors from {}: {}", target, e);
                Vec::new()
            }
        };

        let links = hrefs
            .iter()
            .filter_map(|href| accept(href, &base, &self.config.scope))
            .collect();

        Some(links)
    }

    /// Feeds accepted links to the frontier
    ///
    /// Returns the number of links offered and how many were new.
    fn record_links(&mut self, links: Vec<Link>) -> (usize, usize) {
        let accepted = links.len();
        let new = links
            .into_iter()
            .filter(|link| self.frontier.record_discovery(link.clone()))
            .count();
        (accepted, new)
    }
}

/// Runs a crawl with the given launcher
///
/// # Example
///
/// ```no_run
/// use sumi_drift::config::{load_config, ConfigOverrides, DriverKind};
/// use sumi_drift::crawler::run_crawl;
/// use sumi_drift::driver::DefaultLauncher;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let overrides = ConfigOverrides {
///     url: "https://example.com/".to_string(),
///     ..Default::default()
/// };
/// let config = load_config(overrides, None)?;
/// let outcome = run_crawl(config, &DefaultLauncher::new(DriverKind::Http)).await?;
/// println!("Visited {} pages", outcome.pages_navigated);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: Config,
    launcher: &dyn DriverLauncher,
) -> crate::Result<CrawlOutcome> {
    Coordinator::new(config).run(launcher).await
}
