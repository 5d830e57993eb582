use crate::config::types::{
    Config, CrawlerConfig, DriverConfig, DriverKind, FileConfig, OutputConfig, DEFAULT_MAX_PAGES,
    DEFAULT_NETWORK_TIMEOUT_SECS, DEFAULT_REPORT_PATH,
};
use crate::config::validation::{
    validate_delay, validate_domain_pattern, validate_max_pages, validate_network_timeout,
    validate_report_path, validate_seed,
};
use crate::url::ScopeSpec;
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Values supplied on the command line
///
/// `None` (or an empty `domains` list) means "not given" and lets the
/// configuration file or the built-in default decide.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Seed URL, always required
    pub url: String,
    pub domains: Vec<String>,
    pub show_browser: Option<bool>,
    pub human: Option<bool>,
    pub max_pages: Option<usize>,
    pub delay: Option<f64>,
    pub network_timeout: Option<f64>,
    pub report_path: Option<PathBuf>,
    pub driver: Option<DriverKind>,
    pub chrome_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

/// Reads and parses a configuration file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(FileConfig)` - The parsed, not yet validated, file
/// * `Err(ConfigError)` - The file could not be read or is not valid TOML
pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let file: FileConfig = toml::from_str(&content)?;
    Ok(file)
}

/// Builds the crawl configuration from command-line values and an
/// optional configuration file
///
/// # Example
///
/// ```
/// use sumi_drift::config::{load_config, ConfigOverrides};
///
/// let overrides = ConfigOverrides {
///     url: "https://example.com/".to_string(),
///     ..Default::default()
/// };
/// let config = load_config(overrides, None).unwrap();
/// assert_eq!(config.crawler.max_pages, 25);
/// assert_eq!(config.scope.patterns(), ["example.com", "*.example.com"]);
/// ```
pub fn load_config(overrides: ConfigOverrides, path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => {
            tracing::debug!("Loading configuration from {}", path.display());
            load_file_config(path)?
        }
        None => FileConfig::default(),
    };

    resolve_config(overrides, file)
}

/// Merges command-line values over file values over defaults and
/// validates the result
pub fn resolve_config(overrides: ConfigOverrides, file: FileConfig) -> Result<Config, ConfigError> {
    let FileConfig {
        crawl,
        browser,
        output,
    } = file;

    let seed = validate_seed(&overrides.url)?;

    let patterns = if !overrides.domains.is_empty() {
        Some(overrides.domains)
    } else {
        crawl.domains.filter(|domains| !domains.is_empty())
    };

    let scope = match patterns {
        Some(patterns) => {
            for pattern in &patterns {
                validate_domain_pattern(pattern)?;
            }
            ScopeSpec::new(patterns)
        }
        None => ScopeSpec::for_seed(seed.as_url()).ok_or_else(|| {
            ConfigError::InvalidUrl(format!("Seed URL '{}' has no host", seed))
        })?,
    };

    let max_pages = overrides
        .max_pages
        .or(crawl.max_pages)
        .unwrap_or(DEFAULT_MAX_PAGES);
    validate_max_pages(max_pages)?;

    let delay = validate_delay(overrides.delay.or(crawl.delay).unwrap_or(0.0))?;

    let network_timeout = validate_network_timeout(
        overrides
            .network_timeout
            .or(crawl.network_timeout)
            .unwrap_or(DEFAULT_NETWORK_TIMEOUT_SECS),
    )?;

    let report_path = overrides
        .report_path
        .or(output.report_path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH));
    validate_report_path(&report_path)?;

    Ok(Config {
        seed,
        scope,
        crawler: CrawlerConfig {
            max_pages,
            delay,
            network_timeout,
            human: overrides.human.or(crawl.human).unwrap_or(false),
            rng_seed: overrides.seed.or(crawl.seed),
        },
        browser: DriverConfig {
            driver: overrides.driver.or(browser.driver).unwrap_or_default(),
            show_browser: overrides
                .show_browser
                .or(browser.show_browser)
                .unwrap_or(false),
            chrome_path: overrides.chrome_path.or(browser.chrome_path),
        },
        output: OutputConfig { report_path },
    })
}
