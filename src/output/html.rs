//! HTML report generation
//!
//! Renders a [`CrawlReport`] as a single self-contained document: inline
//! styles, no scripts, no external assets.

use crate::output::{CrawlReport, OutputError, OutputResult};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::Path;

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; margin: 2rem; color: #222; }
h1 { font-size: 1.5rem; }
h2 { font-size: 1.2rem; margin-top: 2rem; border-bottom: 1px solid #ddd; }
table { border-collapse: collapse; }
th, td { text-align: left; padding: 0.25rem 0.75rem; border-bottom: 1px solid #eee; }
td.status { font-family: monospace; }
tr.error td.status { color: #b00020; font-weight: bold; }
tr.ok td.status { color: #1b5e20; }
ul { font-family: monospace; }
.muted { color: #777; }
";

/// Writes the report to `output_path`, stamped with the current time
///
/// Missing parent directories are created.
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to create or write the file
pub fn write_html_report(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    let html = render_html(report, Utc::now());

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| write_error(output_path, e))?;
        }
    }

    std::fs::write(output_path, html).map_err(|e| write_error(output_path, e))?;

    Ok(())
}

fn write_error(path: &Path, e: std::io::Error) -> OutputError {
    OutputError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// Renders the report as an HTML document
///
/// Pure: the same report and timestamp always produce the same bytes.
pub fn render_html(report: &CrawlReport, generated_at: DateTime<Utc>) -> String {
    let target = escape_html(&report.target_url);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>Crawl report for {}</title>", target);
    let _ = writeln!(html, "<style>\n{}</style>", STYLE);
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>Crawl report for {}</h1>", target);
    let _ = writeln!(
        html,
        "<p class=\"muted\">Generated {}</p>",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    // Summary
    html.push_str("<h2>Summary</h2>\n<table>\n");
    summary_row(&mut html, "Target", &target);
    summary_row(&mut html, "Pages visited", &report.visited.len().to_string());
    summary_row(&mut html, "Links discovered", &report.discovered.len().to_string());
    summary_row(&mut html, "Requests", &report.requests.len().to_string());
    summary_row(&mut html, "OK responses (&lt; 400)", &report.ok_count().to_string());
    summary_row(&mut html, "Error responses (&ge; 400)", &report.error_count().to_string());
    summary_row(&mut html, "Domains", &report.domains.len().to_string());
    html.push_str("</table>\n");

    // Requests
    let _ = writeln!(html, "<h2>Requests ({})</h2>", report.requests.len());
    let requests = report.sorted_requests();
    if requests.is_empty() {
        html.push_str("<p class=\"muted\">None</p>\n");
    } else {
        html.push_str("<table>\n<tr><th>Status</th><th>URL</th></tr>\n");
        for (url, status) in requests {
            let class = if status >= 400 { "error" } else { "ok" };
            let _ = writeln!(
                html,
                "<tr class=\"{}\"><td class=\"status\">{}</td><td>{}</td></tr>",
                class,
                status,
                escape_html(url)
            );
        }
        html.push_str("</table>\n");
    }

    url_section(&mut html, "Visited Pages", &report.sorted_visited(), true);
    url_section(&mut html, "Discovered Links", &report.sorted_discovered(), true);
    url_section(&mut html, "Domains", &report.sorted_domains(), false);

    html.push_str("</body>\n</html>\n");
    html
}

fn summary_row(html: &mut String, label: &str, value: &str) {
    let _ = writeln!(html, "<tr><th>{}</th><td>{}</td></tr>", label, value);
}

/// Renders a heading and a list, linking each entry if `linked`
fn url_section(html: &mut String, title: &str, items: &[&str], linked: bool) {
    let _ = writeln!(html, "<h2>{} ({})</h2>", title, items.len());

    if items.is_empty() {
        html.push_str("<p class=\"muted\">None</p>\n");
        return;
    }

    html.push_str("<ul>\n");
    for item in items {
        let escaped = escape_html(item);
        if linked {
            let _ = writeln!(html, "<li><a href=\"{0}\">{0}</a></li>", escaped);
        } else {
            let _ = writeln!(html, "<li>{}</li>", escaped);
        }
    }
    html.push_str("</ul>\n");
}

/// Escapes text for use in HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
