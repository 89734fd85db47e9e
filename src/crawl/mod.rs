// src/crawl/mod.rs
// =============================================================================
// This module handles walking the site.
//
// Features:
// - Depth-first traversal of index pages down to leaf pages
// - Pagination through multi-page revision sequences
// - Per-branch isolation of fetch failures, collected into the outcome
// - Optional visited set so looping links can't run forever
//
// Submodules:
// - fetch: the PageFetcher seam and its reqwest implementation
// - walker: SiteCrawler, the traversal itself
// =============================================================================

mod fetch;
mod walker;

pub use fetch::{HttpFetcher, PageFetcher};
pub use walker::{CrawlError, CrawlOptions, CrawlOutcome, CrawlStats, SiteCrawler};
