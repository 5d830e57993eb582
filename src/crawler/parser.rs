//! Anchor extraction from rendered HTML
//!
//! Page drivers hand the rendered document to this module. It returns raw
//! `href` values exactly as written; resolution and filtering are left to
//! the URL classifier so that a malformed anchor only ever costs itself.

use scraper::{Html, Selector};

/// Returns the raw `href` of every `<a>` element, in document order
///
/// Every `<a href>` is returned, including ones that will later be rejected
/// (`mailto:`, off-site, fragment-only). Empty hrefs are skipped.
///
/// # Example
///
/// ```
/// use sumi_drift::crawler::extract_anchor_hrefs;
///
/// let html = r#"<html><body><a href="/page">Link</a><a name="x">No href</a></body></html>"#;
/// assert_eq!(extract_anchor_hrefs(html), vec!["/page".to_string()]);
/// ```
pub fn extract_anchor_hrefs(html: &str) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    let document = Html::parse_document(html);

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hrefs_are_raw() {
        let html = r#"
            <html>
            <body>
                <a href="/a">A</a>
                <a href="b">B</a>
                <a href="https://other.com/c">C</a>
            </body>
            </html>
        "#;
        assert_eq!(
            extract_anchor_hrefs(html),
            vec!["/a", "b", "https://other.com/c"]
        );
    }

    #[test]
    fn test_special_schemes_are_kept_for_the_classifier() {
        let html = r##"<a href="mailto:x@example.com">m</a><a href="#top">t</a>"##;
        assert_eq!(extract_anchor_hrefs(html), vec!["mailto:x@example.com", "#top"]);
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<a name="anchor">Named</a><a href="">Empty</a><a href="  /x  ">X</a>"#;
        assert_eq!(extract_anchor_hrefs(html), vec!["/x"]);
    }

    #[test]
    fn test_non_anchor_links_ignored() {
        let html = r#"
            <html><head>
                <link rel="stylesheet" href="/style.css">
                <script src="/app.js"></script>
            </head><body><img src="/logo.png"></body></html>
        "#;
        assert!(extract_anchor_hrefs(html).is_empty());
    }

    #[test]
    fn test_malformed_html_still_parses() {
        let html = r#"<div><a href="/ok">unclosed <p><a href="/also">"#;
        assert_eq!(extract_anchor_hrefs(html), vec!["/ok", "/also"]);
    }
}
