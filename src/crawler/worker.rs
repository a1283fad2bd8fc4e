//! Worker loop: per-page crawl orchestration
//!
//! Each worker repeatedly takes a URL from the frontier and runs it through
//! the pipeline: robots gate, download, tokenize, fingerprint, duplicate
//! check, link extraction, statistics. All mutation goes through the shared
//! collaborators' synchronized entry points; the worker itself holds no
//! durable state, and nothing a single page does is fatal to the crawl.

use crate::config::Config;
use crate::crawler::fetcher::HttpDownloader;
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::{extract_links, extract_text};
use crate::dedup::{fingerprint, FingerprintStore};
use crate::robots::RobotsCache;
use crate::stats::StatsAggregator;
use crate::text::{compute_frequencies, tokenize};
use crate::url::UrlFilter;
use std::sync::Arc;
use url::Url;

/// Shared collaborators handed to every worker
///
/// One context is built per crawl and shared behind a single `Arc`; each
/// collaborator synchronizes its own mutation internally.
pub struct WorkerContext {
    pub config: Config,
    pub frontier: Frontier,
    pub downloader: HttpDownloader,
    pub filter: UrlFilter,
    pub store: FingerprintStore,
    pub stats: StatsAggregator,
    /// Present only when `respect-robots-txt` is enabled
    pub robots: Option<RobotsCache>,
}

/// Runs one worker until the frontier is exhausted
pub async fn run_worker(worker_id: usize, ctx: Arc<WorkerContext>) {
    tracing::debug!("Worker {} started", worker_id);

    while let Some(url) = ctx.frontier.next().await {
        process_page(&ctx, &url).await;
        ctx.frontier.mark_complete(&url);

        // Politeness pause between this worker's successive requests
        tokio::time::sleep(ctx.config.crawler.politeness_delay()).await;
    }

    tracing::debug!("Worker {} finished: frontier exhausted", worker_id);
}

/// Processes a single URL
///
/// Every early return leaves the shared state untouched for this page; the
/// caller marks the URL complete regardless of outcome.
async fn process_page(ctx: &WorkerContext, url: &Url) {
    if let Some(robots) = &ctx.robots {
        if !robots.is_allowed(url).await {
            tracing::debug!("Disallowed by robots.txt: {}", url);
            return;
        }
    }

    let result = ctx.downloader.fetch(url).await;

    // A redirect target is the page's sole candidate link
    if result.is_redirect() {
        if result.final_url != *url && ctx.filter.is_in_scope(&result.final_url) {
            tracing::debug!("Following redirect {} -> {}", url, result.final_url);
            ctx.frontier.enqueue(result.final_url.clone());
        }
        return;
    }

    if !result.is_success() {
        tracing::debug!("Skipping {} (status {})", url, result.status);
        return;
    }

    if result.content_length > ctx.config.crawler.max_content_bytes {
        tracing::debug!(
            "Skipping oversize page {} ({} bytes)",
            url,
            result.content_length
        );
        return;
    }

    let body = result.body.as_deref().unwrap_or_default();
    let text = extract_text(body);
    let tokens: Vec<String> = tokenize(&text).collect();
    let token_count = tokens.len();
    let frequencies = compute_frequencies(tokens);

    match ctx.store.check_and_insert(fingerprint(&frequencies)) {
        Ok(true) => {}
        Ok(false) => {
            tracing::debug!("Near-duplicate content at {}", url);
            return;
        }
        Err(e) => {
            // The page did not pass the duplicate check, so it contributes
            // neither statistics nor links.
            tracing::error!("Fingerprint store write failed for {}: {}", url, e);
            return;
        }
    }

    // Near-empty pages are not worth propagating
    if token_count >= ctx.config.crawler.min_tokens_for_links {
        for link in extract_links(&result.final_url, body) {
            if ctx.filter.is_in_scope(&link) {
                ctx.frontier.enqueue(link);
            }
        }
    }

    ctx.stats.record_page(&result.final_url, token_count, &frequencies);
}
