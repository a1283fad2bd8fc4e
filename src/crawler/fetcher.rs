//! HTTP fetcher implementation
//!
//! This module builds the shared HTTP client and performs page downloads.
//! Redirects are never followed automatically; a 3xx response surfaces its
//! resolved target so the worker can treat it as a candidate link. Network
//! failures are folded into the result as a synthetic status code, so no
//! error ever escapes a download.

use crate::config::UserAgentConfig;
use reqwest::{header, redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Status code used when the request failed before an HTTP response arrived
pub const STATUS_NETWORK_ERROR: u16 = 0;

/// Result of downloading one URL
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// HTTP status code (0 = network-level failure)
    pub status: u16,

    /// The request URL, except for 3xx responses where it carries the
    /// resolved `Location` target
    pub final_url: Url,

    /// Decoded body text, present only for 2xx responses that look like HTML
    pub body: Option<String>,

    /// Decoded body length in bytes (0 when there is no body)
    pub content_length: usize,
}

impl FetchResult {
    /// True when the download produced content worth processing
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status) && self.body.is_some()
    }

    /// True for redirect statuses, whose `final_url` is the candidate target
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

/// Builds the HTTP client shared by page downloads and robots.txt fetches
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use kumo_weave::config::UserAgentConfig;
/// use kumo_weave::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "KumoWeave".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent_string())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::none()) // Redirect targets go through scope filtering
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page downloader wrapping the shared HTTP client
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    /// Wraps an already-built client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Downloads one page
    ///
    /// # Request flow
    ///
    /// 1. GET the URL with redirects disabled.
    /// 2. 2xx: read the body as text, unless the `Content-Type` header is
    ///    present and is not HTML.
    /// 3. 3xx: resolve the `Location` header against the request URL and
    ///    return it as `final_url`, with no body.
    /// 4. Any other status: surfaced as-is, no body.
    /// 5. Network/timeout errors: logged and mapped to status 0.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to download
    pub async fn fetch(&self, url: &Url) -> FetchResult {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Request failed for {}: {}", url, e);
                return FetchResult {
                    status: STATUS_NETWORK_ERROR,
                    final_url: url.clone(),
                    body: None,
                    content_length: 0,
                };
            }
        };

        let status = response.status().as_u16();

        if response.status().is_redirection() {
            let target = response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|location| url.join(location).ok())
                .unwrap_or_else(|| url.clone());

            return FetchResult {
                status,
                final_url: target,
                body: None,
                content_length: 0,
            };
        }

        if !response.status().is_success() {
            return FetchResult {
                status,
                final_url: url.clone(),
                body: None,
                content_length: 0,
            };
        }

        // A declared non-HTML content type is not worth tokenizing
        if let Some(content_type) = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !content_type.contains("text/html") && !content_type.contains("application/xhtml+xml")
            {
                tracing::debug!("Skipping non-HTML content at {}: {}", url, content_type);
                return FetchResult {
                    status,
                    final_url: url.clone(),
                    body: None,
                    content_length: 0,
                };
            }
        }

        let final_url = response.url().clone();
        match response.text().await {
            Ok(body) => {
                let content_length = body.len();
                FetchResult {
                    status,
                    final_url,
                    body: Some(body),
                    content_length,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to read body from {}: {}", url, e);
                FetchResult {
                    status: STATUS_NETWORK_ERROR,
                    final_url: url.clone(),
                    body: None,
                    content_length: 0,
                }
            }
        }
    }
}
