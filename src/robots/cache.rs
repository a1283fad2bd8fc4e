//! Per-origin robots.txt cache
//!
//! Each origin's robots.txt is fetched at most once per run through the shared
//! HTTP client and kept in memory. Entries older than 24 hours are refetched
//! so that long runs pick up rule changes.

use crate::robots::ParsedRobots;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use std::collections::HashMap;
use tokio::sync::Mutex;
use url::Url;

/// Cached robots.txt rules for one origin
#[derive(Debug, Clone)]
pub struct CachedRobots {
    /// The parsed rules
    pub rules: ParsedRobots,

    /// When the robots.txt was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CachedRobots {
    /// Creates a cache entry stamped with the current time
    pub fn new(rules: ParsedRobots) -> Self {
        Self {
            rules,
            fetched_at: Utc::now(),
        }
    }

    /// Checks if the cached robots.txt is older than 24 hours
    ///
    /// Stale entries are refetched on next use so rule changes made by the
    /// site owner take effect within a day.
    pub fn is_stale(&self) -> bool {
        Utc::now() - self.fetched_at > Duration::hours(24)
    }
}

/// Shared robots.txt gate consulted by workers before every page fetch
///
/// The cache is keyed by origin (`scheme://host[:port]`). A miss triggers a
/// fetch of `<origin>/robots.txt`; any failure to obtain or read the file is
/// treated as allow-all.
pub struct RobotsCache {
    client: Client,
    user_agent: String,
    entries: Mutex<HashMap<String, CachedRobots>>,
}

impl RobotsCache {
    /// Creates an empty cache backed by the given HTTP client
    ///
    /// # Arguments
    ///
    /// * `client` - The shared HTTP client used for robots.txt fetches
    /// * `user_agent` - The crawler's user agent name, used for rule matching
    pub fn new(client: Client, user_agent: String) -> Self {
        Self {
            client,
            user_agent,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Checks whether the crawler may fetch a URL
    ///
    /// The lock is not held across the fetch, so two workers hitting a new
    /// origin together may both download the same document; the second insert
    /// replaces the first with identical content.
    pub async fn is_allowed(&self, url: &Url) -> bool {
        let origin = url.origin();
        if !origin.is_tuple() {
            // No meaningful origin to fetch robots.txt from
            return true;
        }
        let origin = origin.ascii_serialization();

        {
            let entries = self.entries.lock().await;
            if let Some(cached) = entries.get(&origin) {
                if !cached.is_stale() {
                    return cached.rules.is_allowed(url.as_str(), &self.user_agent);
                }
            }
        }

        let rules = self.fetch_rules(&origin).await;
        let allowed = rules.is_allowed(url.as_str(), &self.user_agent);

        let mut entries = self.entries.lock().await;
        entries.insert(origin, CachedRobots::new(rules));

        allowed
    }

    /// Fetches and parses robots.txt for an origin
    async fn fetch_rules(&self, origin: &str) -> ParsedRobots {
        let robots_url = format!("{}/robots.txt", origin);
        tracing::debug!("Fetching robots.txt: {}", robots_url);

        match self.client.get(&robots_url).send().await {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(body) => ParsedRobots::from_content(&body),
                Err(e) => {
                    tracing::warn!("Failed to read robots.txt from {}: {}", robots_url, e);
                    ParsedRobots::allow_all()
                }
            },
            Ok(response) => {
                tracing::debug!(
                    "No robots.txt at {} (status {}), allowing all",
                    robots_url,
                    response.status()
                );
                ParsedRobots::allow_all()
            }
            Err(e) => {
                tracing::warn!("Failed to fetch robots.txt from {}: {}", robots_url, e);
                ParsedRobots::allow_all()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cache_entry_not_stale() {
        let entry = CachedRobots::new(ParsedRobots::allow_all());
        assert!(!entry.is_stale());
    }

    #[test]
    fn test_cache_entry_stale_after_25_hours() {
        let mut entry = CachedRobots::new(ParsedRobots::allow_all());
        entry.fetched_at = Utc::now() - Duration::hours(25);
        assert!(entry.is_stale());
    }

    #[test]
    fn test_cache_entry_fresh_at_23_hours() {
        let mut entry = CachedRobots::new(ParsedRobots::allow_all());
        entry.fetched_at = Utc::now() - Duration::hours(23);
        assert!(!entry.is_stale());
    }

    #[test]
    fn test_cached_rules_are_consulted() {
        let entry = CachedRobots::new(ParsedRobots::from_content(
            "User-agent: *\nDisallow: /private",
        ));
        assert!(!entry
            .rules
            .is_allowed("http://ics.uci.edu/private", "KumoWeave"));
        assert!(entry.rules.is_allowed("http://ics.uci.edu/open", "KumoWeave"));
    }

    // End-to-end cache behavior (fetch-once, denial preventing a page fetch)
    // is exercised against a mock server in the integration tests.
}
