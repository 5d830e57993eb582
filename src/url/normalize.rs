use crate::UrlError;
use std::fmt;
use url::Url;

/// A normalized absolute URL with no fragment
///
/// Links are only produced by [`normalize`], so every `Link` is absolute
/// and fragment-free. Ordering and equality follow the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link(Url);

impl Link {
    /// Returns the serialized URL
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the underlying parsed URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host of this link, if it has one
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Consumes the link and returns its serialized form
    pub fn into_string(self) -> String {
        self.0.into()
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl AsRef<str> for Link {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Resolves an href against a base URL and strips its fragment
///
/// # Arguments
///
/// * `href` - The raw attribute value, absolute or relative
/// * `base` - The URL of the page the href was found on
///
/// # Returns
///
/// * `Ok(Link)` - The canonical absolute URL without fragment
/// * `Err(UrlError)` - The href could not be resolved
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_drift::url::normalize;
///
/// let base = Url::parse("https://example.com/docs/").unwrap();
/// let link = normalize("guide#install", &base).unwrap();
/// assert_eq!(link.as_str(), "https://example.com/docs/guide");
/// ```
pub fn normalize(href: &str, base: &Url) -> Result<Link, UrlError> {
    let mut url = base
        .join(href)
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    url.set_fragment(None);

    Ok(Link(url))
}

/// Parses an absolute URL string into a [`Link`]
///
/// Used for the seed URL, which has no page to be resolved against.
pub fn parse_link(raw: &str) -> Result<Link, UrlError> {
    let url = Url::parse(raw).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;
    normalize(url.as_str(), &url)
}
