//! Sumi-Drift main entry point
//!
//! This is the command-line interface for the Sumi-Drift site explorer.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumi_drift::config::{load_config, ConfigOverrides, DriverKind};
use sumi_drift::crawler::crawl;
use sumi_drift::output::print_statistics;
use tracing_subscriber::EnvFilter;

/// Sumi-Drift: a scoped random-walk site explorer
///
/// Sumi-Drift starts at a URL and wanders the site one randomly chosen,
/// not yet visited link at a time, staying inside the permitted domains.
/// It records every page visited, every link discovered and every network
/// response observed, then writes an HTML report.
#[derive(Parser, Debug)]
#[command(name = "sumi-drift")]
#[command(version)]
#[command(about = "A scoped random-walk site explorer", long_about = None)]
struct Cli {
    /// URL to start from
    #[arg(value_name = "URL")]
    url: String,

    /// Domain pattern to stay within (repeatable, globs allowed);
    /// defaults to the URL's host and its subdomains
    #[arg(short, long = "domain", value_name = "PATTERN")]
    domains: Vec<String>,

    /// Show the browser window instead of running headless
    #[arg(short = 'S', long, overrides_with = "headless")]
    show_browser: bool,

    /// Run headless even if the config file shows the browser
    #[arg(long, overrides_with = "show_browser")]
    headless: bool,

    /// Imitate a human reader (mouse moves, scrolling, pauses) on each page
    #[arg(short = 'u', long, overrides_with = "no_human")]
    human: bool,

    /// Skip the human imitation even if the config file enables it
    #[arg(long, overrides_with = "human")]
    no_human: bool,

    /// Maximum number of pages to navigate [default: 25]
    #[arg(short, long, value_name = "N")]
    max_pages: Option<usize>,

    /// Seconds to wait after each page [default: 0]
    #[arg(short = 'w', long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Seconds before a navigation is abandoned [default: 10]
    #[arg(short = 't', long, value_name = "SECONDS")]
    network_timeout: Option<f64>,

    /// Report destination [default: report.html]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Page driver to use [default: chromium]
    #[arg(long, value_enum)]
    driver: Option<DriverKind>,

    /// Chromium executable, located automatically if omitted
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// Seed for the link picker, for reproducible walks
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            url: self.url.clone(),
            domains: self.domains.clone(),
            show_browser: switch(self.show_browser, self.headless),
            human: switch(self.human, self.no_human),
            max_pages: self.max_pages,
            delay: self.delay,
            network_timeout: self.network_timeout,
            report_path: self.output.clone(),
            driver: self.driver,
            chrome_path: self.chrome_path.clone(),
            seed: self.seed,
        }
    }
}

/// Maps an on/off flag pair to an override; neither flag leaves it unset
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration before anything is launched
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let config = load_config(cli.overrides(), cli.config.as_deref())
        .context("Invalid configuration")?;

    tracing::info!(
        "Driver: {:?}, headless: {}, human: {}",
        config.browser.driver,
        !config.browser.show_browser,
        config.crawler.human
    );

    // Run the crawler
    let outcome = crawl(config).await.context("Crawl failed")?;

    if !cli.quiet {
        print_statistics(&outcome.report, outcome.stopped_by);
        println!("\nReport written to: {}", outcome.report_path.display());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_drift=info,warn"),
            1 => EnvFilter::new("sumi_drift=debug,info"),
            2 => EnvFilter::new("sumi_drift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
