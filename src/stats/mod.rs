//! Crawl statistics and report generation
//!
//! One synchronized aggregator accumulates the crawl-wide counters; at
//! shutdown a snapshot is rendered into the plain-text report.

mod aggregator;
mod report;

pub use aggregator::{StatsAggregator, StatsSnapshot};
pub use report::{render_report, write_report, TOP_WORD_COUNT};
