//! URL handling module
//!
//! This module provides host extraction, root-domain matching, and the
//! crawl-scope filter that decides which discovered URLs are worth
//! enqueuing.

mod domain;
mod filter;

pub use domain::{extract_domain, is_same_or_subdomain};
pub use filter::UrlFilter;
