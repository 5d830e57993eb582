use url::{Host, Url};

/// Extracts the host from a URL
///
/// Domain names are already lowercased by parsing. IPv6 addresses are
/// returned without their brackets, so `http://[::1]/` yields `::1`.
/// Returns None for URLs without a host (`mailto:`, `data:`, `javascript:`
/// and friends).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_drift::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_host(&url), None);
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Ipv6(addr) => Some(addr.to_string()),
        _ => url.host_str().map(str::to_owned),
    }
}
