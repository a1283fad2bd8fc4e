//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The shared frontier and its termination semantics
//! - HTTP fetching with manual redirect handling
//! - HTML text and link extraction
//! - The per-page worker pipeline
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod worker;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, FetchResult, HttpDownloader, STATUS_NETWORK_ERROR};
pub use frontier::Frontier;
pub use parser::{extract_links, extract_text};
pub use worker::{run_worker, WorkerContext};

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open or rehydrate the fingerprint store
/// 2. Build the HTTP client and robots cache
/// 3. Seed the frontier from the configured scope
/// 4. Run the worker pool until the frontier is exhausted
/// 5. Write the final report
///
/// # Arguments
///
/// * `config` - The validated crawler configuration
/// * `fresh` - Start over instead of rehydrating the fingerprint log
///
/// # Returns
///
/// * `Ok(())` - Crawl completed and the report was written
/// * `Err(KumoError)` - Setup failed or the report could not be written
pub async fn crawl(config: Config, fresh: bool) -> Result<()> {
    let coordinator = Coordinator::new(config, fresh)?;
    coordinator.run().await
}
