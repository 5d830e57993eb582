use crate::url::{parse_link, Link};
use crate::ConfigError;
use std::path::Path;
use std::time::Duration;

/// Validates the seed URL and returns it as a link
///
/// The seed must be an absolute `http` or `https` URL with a host.
pub fn validate_seed(raw: &str) -> Result<Link, ConfigError> {
    let link = parse_link(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", raw, e)))?;

    let scheme = link.as_url().scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' must use http or https, got '{}'",
            raw, scheme
        )));
    }

    if link.host().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' has no host",
            raw
        )));
    }

    Ok(link)
}

/// Validates a domain pattern (exact hostname or glob)
pub fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain pattern cannot be empty".to_string(),
        ));
    }

    // Check for invalid characters
    // ':' admits IPv6 literals such as `::1`
    let allowed = |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '*' | '?' | '[' | ']' | '!')
    };
    if !pattern.chars().all(allowed) {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain pattern '{}' contains invalid characters",
            pattern
        )));
    }

    // Check that it doesn't start or end with a dot or hyphen
    if pattern.starts_with('.')
        || pattern.ends_with('.')
        || pattern.starts_with('-')
        || pattern.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain pattern '{}' cannot start or end with '.' or '-'",
            pattern
        )));
    }

    // Check for consecutive dots
    if pattern.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain pattern '{}' cannot contain consecutive dots",
            pattern
        )));
    }

    validate_brackets(pattern)
}

/// Checks that character classes are closed, non-empty and not nested
fn validate_brackets(pattern: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| {
        Err(ConfigError::InvalidPattern(format!(
            "Domain pattern '{}' {}",
            pattern, reason
        )))
    };

    // Characters seen inside the current class, None outside of one
    let mut class: Option<usize> = None;
    let mut prev = None;

    for c in pattern.chars() {
        match (c, class) {
            ('[', None) => class = Some(0),
            ('[', Some(_)) => return invalid("has a nested '['"),
            (']', None) => return invalid("has an unmatched ']'"),
            (']', Some(0)) => return invalid("has an empty character class"),
            (']', Some(_)) => class = None,
            ('!', Some(0)) if prev == Some('[') => {}
            ('!', _) => return invalid("has '!' outside the start of a character class"),
            ('*', Some(_)) | ('?', Some(_)) => {
                return invalid("has a wildcard inside a character class")
            }
            (_, Some(n)) => class = Some(n + 1),
            (_, None) => {}
        }
        prev = Some(c);
    }

    if class.is_some() {
        return invalid("has an unclosed '['");
    }

    Ok(())
}

/// Validates the page budget
pub fn validate_max_pages(max_pages: usize) -> Result<(), ConfigError> {
    if max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            max_pages
        )));
    }
    Ok(())
}

/// Converts the inter-page delay, which may be zero
pub fn validate_delay(seconds: f64) -> Result<Duration, ConfigError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delay must be a non-negative number of seconds, got {}",
            seconds
        )));
    }
    Ok(Duration::from_secs_f64(seconds))
}

/// Converts the navigation timeout, which must be positive
pub fn validate_network_timeout(seconds: f64) -> Result<Duration, ConfigError> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "network-timeout must be a positive number of seconds, got {}",
            seconds
        )));
    }
    Ok(Duration::from_secs_f64(seconds))
}

/// Validates the report path
pub fn validate_report_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "report path cannot be empty".to_string(),
        ));
    }
    Ok(())
}
