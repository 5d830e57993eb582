//! Console statistics for a finished crawl

use crate::output::CrawlReport;
use crate::state::CrawlPhase;
use std::fmt::Write as _;

/// Formats crawl statistics for the console
///
/// # Arguments
///
/// * `report` - The collected crawl data
/// * `stopped_by` - The phase that ended the navigation loop
pub fn format_statistics(report: &CrawlReport, stopped_by: CrawlPhase) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Statistics ===\n\n");

    let reason = match stopped_by {
        CrawlPhase::Exhausted => "every discovered link was visited",
        CrawlPhase::PageBudgetReached => "page budget reached",
        other => other.as_str(),
    };

    let _ = writeln!(out, "Overview:");
    let _ = writeln!(out, "  Target: {}", report.target_url);
    let _ = writeln!(out, "  Stopped: {}", reason);
    let _ = writeln!(out, "  Pages visited: {}", report.visited.len());
    let _ = writeln!(out, "  Links discovered: {}", report.discovered.len());
    let _ = writeln!(out, "  Unvisited links: {}", unvisited(report));
    let _ = writeln!(out, "  Domains contacted: {}", report.domains.len());
    out.push('\n');

    let total = report.requests.len();
    let _ = writeln!(out, "Requests ({}):", total);
    let _ = writeln!(out, "  OK (< 400): {}", report.ok_count());
    let _ = writeln!(out, "  Errors (>= 400): {}", report.error_count());

    let success_rate = if total > 0 {
        (report.ok_count() as f64 / total as f64) * 100.0
    } else {
        0.0
    };
    let _ = writeln!(out, "  Success rate: {:.1}%", success_rate);

    let errors: Vec<_> = report
        .sorted_requests()
        .into_iter()
        .filter(|(_, status)| *status >= 400)
        .collect();
    if !errors.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Failed Requests:");
        for (url, status) in errors.iter().take(20) {
            let _ = writeln!(out, "  {} {}", status, url);
        }
        if errors.len() > 20 {
            let _ = writeln!(out, "  ... and {} more", errors.len() - 20);
        }
    }

    out
}

/// Prints crawl statistics to stdout
pub fn print_statistics(report: &CrawlReport, stopped_by: CrawlPhase) {
    print!("{}", format_statistics(report, stopped_by));
}

fn unvisited(report: &CrawlReport) -> usize {
    report
        .discovered
        .iter()
        .filter(|link| !report.visited.contains(link))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::parse_link;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_format_statistics() {
        let a = parse_link("https://example.com/a").unwrap();
        let b = parse_link("https://example.com/b").unwrap();
        let report = CrawlReport {
            target_url: "https://example.com/".to_string(),
            discovered: [a.clone(), b].into_iter().collect(),
            visited: vec![parse_link("https://example.com/").unwrap(), a],
            requests: HashMap::from([
                ("https://example.com/".to_string(), 200),
                ("https://example.com/a".to_string(), 200),
                ("https://example.com/x.css".to_string(), 200),
                ("https://example.com/gone".to_string(), 404),
            ]),
            domains: HashSet::from(["example.com".to_string()]),
        };

        let text = format_statistics(&report, CrawlPhase::PageBudgetReached);

        assert!(text.contains("Stopped: page budget reached"));
        assert!(text.contains("Pages visited: 2"));
        assert!(text.contains("Links discovered: 2"));
        assert!(text.contains("Unvisited links: 1"));
        assert!(text.contains("OK (< 400): 3"));
        assert!(text.contains("Errors (>= 400): 1"));
        assert!(text.contains("Success rate: 75.0%"));
        assert!(text.contains("404 https://example.com/gone"));
    }

    #[test]
    fn test_format_empty() {
        let text = format_statistics(&CrawlReport::default(), CrawlPhase::Exhausted);
        assert!(text.contains("every discovered link was visited"));
        assert!(text.contains("Success rate: 0.0%"));
        assert!(!text.contains("Failed Requests"));
    }
}
