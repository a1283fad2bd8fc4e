//! Crawl coordination: setup, worker pool, shutdown
//!
//! The coordinator builds every shared collaborator from the validated
//! configuration, seeds the frontier, spawns the worker pool, and, once the
//! frontier is exhausted and all workers have joined, renders the final
//! report. The report write is the only fatal I/O after startup.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, HttpDownloader};
use crate::crawler::frontier::Frontier;
use crate::crawler::worker::{run_worker, WorkerContext};
use crate::dedup::FingerprintStore;
use crate::robots::RobotsCache;
use crate::stats::{write_report, StatsAggregator};
use crate::url::UrlFilter;
use crate::{KumoError, Result};
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Owns the shared crawl state and drives the worker pool
pub struct Coordinator {
    ctx: Arc<WorkerContext>,
}

impl Coordinator {
    /// Builds every collaborator and seeds the frontier
    ///
    /// # Arguments
    ///
    /// * `config` - The validated crawler configuration
    /// * `fresh` - Truncate the fingerprint log instead of rehydrating the
    ///   store from a previous run
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(KumoError)` - A seed failed to parse, the fingerprint log
    ///   could not be opened, or the HTTP client could not be built
    pub fn new(config: Config, fresh: bool) -> Result<Self> {
        let filter = UrlFilter::new(&config.scope);

        let store = FingerprintStore::open(
            Path::new(&config.dedup.fingerprint_log),
            config.dedup.similarity_threshold,
            fresh,
        )?;

        let stats = StatsAggregator::new(&config.scope.subdomain_root);

        let client = build_http_client(&config.user_agent)?;
        let robots = if config.crawler.respect_robots_txt {
            Some(RobotsCache::new(
                client.clone(),
                config.user_agent.crawler_name.clone(),
            ))
        } else {
            None
        };
        let downloader = HttpDownloader::new(client);

        let frontier = Frontier::new();
        for seed in &config.scope.seeds {
            let url = Url::parse(seed).map_err(|source| KumoError::Seed {
                url: seed.clone(),
                source,
            })?;
            if filter.is_in_scope(&url) {
                frontier.enqueue(url);
            } else {
                tracing::warn!("Seed {} is out of scope, skipping", seed);
            }
        }
        tracing::info!("Seeded frontier with {} URLs", frontier.seen_count());

        Ok(Self {
            ctx: Arc::new(WorkerContext {
                config,
                frontier,
                downloader,
                filter,
                store,
                stats,
                robots,
            }),
        })
    }

    /// Runs the crawl to completion and writes the report
    ///
    /// Spawns the configured number of workers and waits for all of them to
    /// observe frontier exhaustion. Page-level failures have already been
    /// absorbed inside the workers; only the final report write can fail
    /// here.
    pub async fn run(&self) -> Result<()> {
        let worker_count = self.ctx.config.crawler.worker_count;
        tracing::info!("Starting crawl with {} workers", worker_count);
        let start_time = std::time::Instant::now();

        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let ctx = Arc::clone(&self.ctx);
            handles.push(tokio::spawn(run_worker(worker_id, ctx)));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("Worker task failed: {}", e);
            }
        }

        let snapshot = self.ctx.stats.snapshot();
        write_report(&snapshot, Path::new(&self.ctx.config.output.report_path))?;

        tracing::info!(
            "Crawl completed: {} unique pages, {} URLs discovered, {} fingerprints stored, {:.1?} elapsed",
            snapshot.unique_pages,
            self.ctx.frontier.seen_count(),
            self.ctx.store.len(),
            start_time.elapsed()
        );
        tracing::info!("Report written to {}", self.ctx.config.output.report_path);

        Ok(())
    }
}
