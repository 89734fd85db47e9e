//! Crawls a hierarchically organised content site and audits the image
//! assets it publishes against a manifest of expected assets.
//!
//! The pipeline:
//!
//! 1. [`crawl::SiteCrawler`] walks index pages down to leaf pages, following
//!    revision continuations, and collects [`assets::AssetRecord`]s through
//!    the [`assets::AssetExtractor`].
//! 2. [`manifest::load`] reads the expected entries for each mode and
//!    [`manifest::reconcile`] classifies every entry as matched, wrong size
//!    or missing.
//! 3. [`report::assemble`] groups the results per mode and appends the fetch
//!    failures; [`report::write_report`] streams it to a
//!    [`report::ReportSink`].
//!
//! Network access sits behind the [`crawl::PageFetcher`] and
//! [`assets::SizeProbe`] traits so the whole engine runs against in-memory
//! fakes in tests.

pub mod assets;
pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod manifest;
pub mod page;
pub mod report;
