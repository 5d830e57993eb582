//! URL handling module for Sumi-Drift
//!
//! This module implements link classification: resolving hrefs into
//! normalized [`Link`]s, matching hosts against the crawl scope, and
//! filtering out URLs that point at non-HTML resources.

mod domain;
mod filter;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::extract_host;
pub use filter::should_skip;
pub use matcher::{is_glob, matches_glob};
pub use normalize::{normalize, parse_link, Link};

use url::Url;

/// Ordered list of domain patterns defining which hosts are in scope
///
/// Each pattern is either an exact hostname or a shell-style glob such as
/// `*.example.com`. The scope is fixed for the duration of a crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeSpec {
    patterns: Vec<String>,
}

impl ScopeSpec {
    /// Creates a scope from explicit patterns
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Derives the default scope for a seed URL: its host plus every subdomain
    ///
    /// Returns None if the seed has no host.
    ///
    /// # Examples
    ///
    /// ```
    /// use url::Url;
    /// use sumi_drift::url::ScopeSpec;
    ///
    /// let seed = Url::parse("https://example.com/start").unwrap();
    /// let scope = ScopeSpec::for_seed(&seed).unwrap();
    /// assert_eq!(scope.patterns(), ["example.com", "*.example.com"]);
    /// ```
    pub fn for_seed(seed: &Url) -> Option<Self> {
        let host = extract_host(seed)?;
        let wildcard = format!("*.{}", host);
        Some(Self::new([host, wildcard]))
    }

    /// Returns the patterns in configuration order
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns true if the hostname matches at least one pattern
    pub fn matches_host(&self, host: &str) -> bool {
        self.patterns.iter().any(|pattern| {
            if is_glob(pattern) {
                matches_glob(pattern, host)
            } else {
                pattern == host
            }
        })
    }
}

/// Returns true if the URL's host matches the scope
///
/// URLs without a host are never in scope. IPv6 hosts are matched
/// without their brackets.
pub fn is_in_scope(url: &Url, scope: &ScopeSpec) -> bool {
    extract_host(url)
        .map(|host| scope.matches_host(&host))
        .unwrap_or(false)
}

/// Classifies a raw href found on a page
///
/// Resolves the href against `base`, then rejects it if it is not an
/// HTTP(S) URL, falls outside `scope`, or names a non-HTML resource.
/// Malformed hrefs are dropped, never reported as errors.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_drift::url::{accept, ScopeSpec};
///
/// let base = Url::parse("https://example.com/").unwrap();
/// let scope = ScopeSpec::for_seed(&base).unwrap();
///
/// assert!(accept("/about", &base, &scope).is_some());
/// assert!(accept("https://other.com/", &base, &scope).is_none());
/// assert!(accept("/brochure.pdf", &base, &scope).is_none());
/// ```
pub fn accept(href: &str, base: &Url, scope: &ScopeSpec) -> Option<Link> {
    let link = match normalize(href, base) {
        Ok(link) => link,
        Err(e) => {
            tracing::trace!("Dropping malformed href {:?}: {}", href, e);
            return None;
        }
    };

    let url = link.as_url();
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    if !is_in_scope(url, scope) || should_skip(url) {
        return None;
    }

    Some(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_scope() -> ScopeSpec {
        ScopeSpec::new(["example.com", "*.example.com"])
    }

    fn base() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn test_scope_glob_examples() {
        let wildcard = ScopeSpec::new(["*.example.com"]);
        assert!(wildcard.matches_host("a.example.com"));
        assert!(!wildcard.matches_host("example.com"));

        let exact = ScopeSpec::new(["example.com"]);
        assert!(exact.matches_host("example.com"));
        assert!(!exact.matches_host("a.example.com"));
    }

    #[test]
    fn test_scope_any_pattern_matches() {
        let scope = ScopeSpec::new(["docs.rs", "*.example.com"]);
        assert!(scope.matches_host("docs.rs"));
        assert!(scope.matches_host("www.example.com"));
        assert!(!scope.matches_host("crates.io"));
    }

    #[test]
    fn test_empty_scope_matches_nothing() {
        let scope = ScopeSpec::new(Vec::<String>::new());
        assert!(!scope.matches_host("example.com"));
    }

    #[test]
    fn test_for_seed() {
        let seed = Url::parse("https://blog.example.com/post/1").unwrap();
        let scope = ScopeSpec::for_seed(&seed).unwrap();
        assert_eq!(scope.patterns(), ["blog.example.com", "*.blog.example.com"]);
    }

    #[test]
    fn test_for_seed_without_host() {
        let seed = Url::parse("data:text/plain,x").unwrap();
        assert!(ScopeSpec::for_seed(&seed).is_none());
    }

    #[test]
    fn test_ipv6_seed_scope_covers_its_own_links() {
        let seed = Url::parse("http://[::1]:8080/").unwrap();
        let scope = ScopeSpec::for_seed(&seed).unwrap();
        assert_eq!(scope.patterns(), ["::1", "*.::1"]);

        assert!(is_in_scope(&seed, &scope));
        let link = accept("/a", &seed, &scope).unwrap();
        assert_eq!(link.as_str(), "http://[::1]:8080/a");
        assert!(accept("http://[::2]:8080/a", &seed, &scope).is_none());
    }

    #[test]
    fn test_is_in_scope() {
        let scope = example_scope();
        assert!(is_in_scope(&Url::parse("https://example.com/a").unwrap(), &scope));
        assert!(is_in_scope(&Url::parse("http://a.b.example.com/").unwrap(), &scope));
        assert!(!is_in_scope(&Url::parse("https://other.com/c").unwrap(), &scope));
        assert!(!is_in_scope(&Url::parse("mailto:x@example.com").unwrap(), &scope));
    }

    #[test]
    fn test_accept_relative() {
        let link = accept("/a", &base(), &example_scope()).unwrap();
        assert_eq!(link.as_str(), "https://example.com/a");
    }

    #[test]
    fn test_accept_rejects_out_of_scope() {
        assert!(accept("https://other.com/c", &base(), &example_scope()).is_none());
    }

    #[test]
    fn test_accept_rejects_skipped_extension() {
        assert!(accept("/files/report.pdf?download=1", &base(), &example_scope()).is_none());
    }

    #[test]
    fn test_accept_rejects_non_http_schemes() {
        for href in [
            "mailto:test@example.com",
            "javascript:void(0)",
            "tel:+1234567890",
            "ftp://example.com/file",
        ] {
            assert!(accept(href, &base(), &example_scope()).is_none(), "{}", href);
        }
    }

    #[test]
    fn test_accept_drops_malformed() {
        assert!(accept("http://[::1", &base(), &example_scope()).is_none());
    }

    #[test]
    fn test_accept_strips_fragment() {
        let link = accept("/guide#step-2", &base(), &example_scope()).unwrap();
        assert_eq!(link.as_str(), "https://example.com/guide");
    }

    #[test]
    fn test_accepted_links_are_sound() {
        let scope = example_scope();
        let hrefs = [
            "/a",
            "b",
            "https://www.example.com/c",
            "https://other.com/d",
            "/e.zip",
            "/f#x",
            "//cdn.example.com/g",
            "::::",
        ];

        for href in hrefs {
            if let Some(link) = accept(href, &base(), &scope) {
                assert!(is_in_scope(link.as_url(), &scope));
                assert!(!should_skip(link.as_url()));
                assert!(link.as_url().fragment().is_none());
            }
        }
    }
}
