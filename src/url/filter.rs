use url::Url;

/// File extensions that never lead to a navigable HTML page
const SKIPPED_EXTENSIONS: &[&str] = &[
    // Archives
    ".zip", ".tar", ".gz", ".tgz", ".bz2", ".xz", ".7z", ".rar",
    // Documents
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".odt", ".ods", ".odp", ".rtf",
    ".epub",
    // Images
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp", ".ico", ".tif", ".tiff", ".avif",
    // Audio
    ".mp3", ".wav", ".ogg", ".flac", ".aac", ".m4a",
    // Video
    ".mp4", ".avi", ".mov", ".wmv", ".mkv", ".webm", ".flv", ".m4v",
    // Fonts
    ".woff", ".woff2", ".ttf", ".otf", ".eot",
    // Structured data
    ".json", ".xml", ".csv", ".yaml", ".yml",
    // Executables and installers
    ".exe", ".msi", ".dmg", ".apk", ".bin", ".deb", ".rpm", ".iso",
    // Build artifacts
    ".map", ".wasm",
];

/// Returns true if the URL path ends with a non-HTML resource extension
///
/// Only the path is inspected; the query string and fragment are ignored.
/// The comparison is case-insensitive.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_drift::url::should_skip;
///
/// assert!(should_skip(&Url::parse("https://x.com/report.pdf").unwrap()));
/// assert!(should_skip(&Url::parse("https://x.com/report.pdf?x=1").unwrap()));
/// assert!(!should_skip(&Url::parse("https://x.com/page").unwrap()));
/// ```
pub fn should_skip(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    SKIPPED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
