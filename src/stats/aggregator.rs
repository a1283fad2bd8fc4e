//! Thread-safe accumulation of crawl-wide counters
//!
//! Workers call [`StatsAggregator::record_page`] once per accepted
//! (non-duplicate) page; all four counters update under a single lock
//! acquisition so they can never disagree about which pages were counted.

use crate::text::TokenFrequency;
use crate::url::{extract_domain, is_same_or_subdomain};
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// Shared, synchronized crawl statistics
pub struct StatsAggregator {
    subdomain_root: String,
    inner: Mutex<StatsInner>,
}

#[derive(Default)]
struct StatsInner {
    unique_pages: u64,
    longest_page: Option<(String, usize)>,
    word_counts: HashMap<String, u64>,
    subdomain_pages: HashMap<String, u64>,
}

/// Point-in-time copy of the aggregate counters, taken at shutdown
#[derive(Debug, Clone, Default)]
pub struct StatsSnapshot {
    /// Number of accepted pages
    pub unique_pages: u64,

    /// URL and token count of the longest page seen
    pub longest_page: Option<(String, usize)>,

    /// Corpus-wide token counts
    pub word_counts: HashMap<String, u64>,

    /// Page counts per host under the subdomain-tracking root
    pub subdomain_pages: HashMap<String, u64>,
}

impl StatsSnapshot {
    /// The most frequent tokens, descending by count and ascending
    /// alphabetically on ties
    pub fn top_words(&self, limit: usize) -> Vec<(String, u64)> {
        let mut words: Vec<(String, u64)> = self
            .word_counts
            .iter()
            .map(|(token, count)| (token.clone(), *count))
            .collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        words.truncate(limit);
        words
    }

    /// Subdomain page counts, ascending by host
    pub fn subdomains_sorted(&self) -> Vec<(String, u64)> {
        let mut subdomains: Vec<(String, u64)> = self
            .subdomain_pages
            .iter()
            .map(|(host, count)| (host.clone(), *count))
            .collect();
        subdomains.sort_by(|a, b| a.0.cmp(&b.0));
        subdomains
    }
}

impl StatsAggregator {
    /// Creates an aggregator tracking subdomains under the given root
    pub fn new(subdomain_root: &str) -> Self {
        Self {
            subdomain_root: subdomain_root.to_lowercase(),
            inner: Mutex::new(StatsInner::default()),
        }
    }

    /// Records one accepted page
    ///
    /// Increments the unique-page count, replaces the longest-page record
    /// when this page's token count is strictly larger, merges the page's
    /// frequencies into the corpus map, and bumps the page's subdomain
    /// counter when its host falls under the tracking root.
    pub fn record_page(&self, url: &Url, token_count: usize, frequencies: &TokenFrequency) {
        let mut inner = self.inner.lock().unwrap();

        inner.unique_pages += 1;

        let is_longer = match &inner.longest_page {
            None => true,
            Some((_, max)) => token_count > *max,
        };
        if is_longer {
            inner.longest_page = Some((url.to_string(), token_count));
        }

        for (token, count) in frequencies {
            *inner.word_counts.entry(token.clone()).or_insert(0) += count;
        }

        if let Some(host) = extract_domain(url) {
            if is_same_or_subdomain(&host, &self.subdomain_root) {
                *inner.subdomain_pages.entry(host).or_insert(0) += 1;
            }
        }

        if inner.unique_pages % 25 == 0 {
            tracing::info!("Progress: {} unique pages accepted", inner.unique_pages);
        }
    }

    /// Number of accepted pages so far
    pub fn unique_pages(&self) -> u64 {
        self.inner.lock().unwrap().unique_pages
    }

    /// Copies the counters out for rendering
    pub fn snapshot(&self) -> StatsSnapshot {
        let inner = self.inner.lock().unwrap();
        StatsSnapshot {
            unique_pages: inner.unique_pages,
            longest_page: inner.longest_page.clone(),
            word_counts: inner.word_counts.clone(),
            subdomain_pages: inner.subdomain_pages.clone(),
        }
    }
}
