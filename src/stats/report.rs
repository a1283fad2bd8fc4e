//! Plain-text report generation
//!
//! Renders the final snapshot into the report file: unique-page count,
//! longest page, top words as `token=count` lines, subdomain counts as
//! `host=count` lines.

use crate::stats::aggregator::StatsSnapshot;
use crate::KumoError;
use chrono::Utc;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Number of top words included in the report
pub const TOP_WORD_COUNT: usize = 50;

/// Formats a snapshot as the final textual report
pub fn render_report(snapshot: &StatsSnapshot) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Crawl report generated {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out.push_str(&format!("Unique pages: {}\n\n", snapshot.unique_pages));

    match &snapshot.longest_page {
        Some((url, count)) => {
            out.push_str(&format!("Longest page: {} ({} tokens)\n\n", url, count))
        }
        None => out.push_str("Longest page: none\n\n"),
    }

    out.push_str(&format!("Top {} words:\n", TOP_WORD_COUNT));
    for (token, count) in snapshot.top_words(TOP_WORD_COUNT) {
        out.push_str(&format!("{}={}\n", token, count));
    }

    out.push_str("\nSubdomains:\n");
    for (host, count) in snapshot.subdomains_sorted() {
        out.push_str(&format!("{}={}\n", host, count));
    }

    out
}

/// Renders a snapshot and writes it to the report file
///
/// This is the one fatal write in the system: a crawl whose report cannot
/// be persisted has nothing to show for itself, so the error is surfaced
/// to the operator instead of being swallowed.
pub fn write_report(snapshot: &StatsSnapshot, path: &Path) -> Result<(), KumoError> {
    let report = render_report(snapshot);

    let mut file = File::create(path).map_err(|source| KumoError::Report {
        path: path.display().to_string(),
        source,
    })?;
    file.write_all(report.as_bytes())
        .map_err(|source| KumoError::Report {
            path: path.display().to_string(),
            source,
        })?;

    Ok(())
}
