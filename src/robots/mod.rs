//! Robots.txt handling module
//!
//! This module provides fetching, parsing, and per-origin caching of
//! robots.txt files so the crawler can respect exclusion rules.

mod cache;
mod parser;

pub use cache::{CachedRobots, RobotsCache};
pub use parser::ParsedRobots;
